use crate::shared::NUM_TRACKS;

use super::state::SoundState;

/// The preset table is a closed enum rather than a name-indexed map, so an
/// unknown preset can't silently resolve to nothing; lookup by UI index goes
/// through `from_index` and returns `None` explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetId {
    RainyCafe,
    ForestMorning,
    CozyFireplace,
}

pub const PRESET_COUNT: usize = 3;

impl PresetId {
    pub const ALL: [PresetId; PRESET_COUNT] = [
        PresetId::RainyCafe,
        PresetId::ForestMorning,
        PresetId::CozyFireplace,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            PresetId::RainyCafe => "Rainy Cafe",
            PresetId::ForestMorning => "Forest Morning",
            PresetId::CozyFireplace => "Cozy Fireplace",
        }
    }

    /// The full per-track state set this preset applies. Always covers every
    /// catalog slot; applying a preset replaces the whole mixer state.
    pub fn states(self) -> [SoundState; NUM_TRACKS] {
        match self {
            PresetId::RainyCafe => [
                SoundState::playing(0.7), // Rain
                SoundState::playing(0.5), // Coffee Shop
                SoundState::paused(0.5),
                SoundState::paused(0.5),
            ],
            PresetId::ForestMorning => [
                SoundState::paused(0.5),
                SoundState::paused(0.5),
                SoundState::playing(0.8), // Birds
                SoundState::paused(0.5),
            ],
            PresetId::CozyFireplace => [
                SoundState::paused(0.5),
                SoundState::paused(0.5),
                SoundState::paused(0.5),
                SoundState::playing(0.6), // Fireplace
            ],
        }
    }
}

pub fn preset_names() -> [&'static str; PRESET_COUNT] {
    [
        PresetId::RainyCafe.name(),
        PresetId::ForestMorning.name(),
        PresetId::CozyFireplace.name(),
    ]
}
