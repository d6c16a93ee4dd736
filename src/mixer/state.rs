use crate::shared::{NUM_TRACKS, TrackStatus};

use super::catalog::{CATALOG, DEFAULT_VOLUME, SoundDefinition};

/// The user-facing playback state of one track. This is what presets replace
/// wholesale and what the display mirrors every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SoundState {
    pub playing: bool,
    pub volume: f32,
}

impl Default for SoundState {
    fn default() -> Self {
        Self {
            playing: false,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl SoundState {
    pub const fn paused(volume: f32) -> Self {
        Self {
            playing: false,
            volume,
        }
    }

    pub const fn playing(volume: f32) -> Self {
        Self {
            playing: true,
            volume,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TrackEntry {
    pub def: SoundDefinition,
    pub state: SoundState,
    pub status: TrackStatus,
}

/// The whole mixer: exactly one entry per catalog id, built once at startup
/// and alive for the session.
#[derive(Clone, Debug)]
pub struct MixerState {
    pub tracks: [TrackEntry; NUM_TRACKS],
    pub selected: u8,
}

impl Default for MixerState {
    fn default() -> Self {
        Self {
            tracks: std::array::from_fn(|i| TrackEntry {
                def: CATALOG[i],
                state: SoundState::default(),
                status: TrackStatus::Loading,
            }),
            selected: 0,
        }
    }
}

impl MixerState {
    pub fn track(&self, index: u8) -> Option<&TrackEntry> {
        self.tracks.get(index as usize)
    }

    pub fn track_mut(&mut self, index: u8) -> Option<&mut TrackEntry> {
        self.tracks.get_mut(index as usize)
    }

    /// Indices of every track currently marked playing.
    pub fn playing_tracks(&self) -> Vec<u8> {
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.state.playing)
            .map(|(i, _)| i as u8)
            .collect()
    }
}
