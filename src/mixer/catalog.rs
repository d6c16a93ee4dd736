use crate::shared::NUM_TRACKS;

/// One entry in the fixed sound catalog. Files are resolved against the
/// asset directory given on the command line.
#[derive(Clone, Copy, Debug)]
pub struct SoundDefinition {
    pub id: u8, // stable 1-based id, matches the preset tables
    pub name: &'static str,
    pub file: &'static str,
}

pub const DEFAULT_VOLUME: f32 = 0.5;

pub const CATALOG: [SoundDefinition; NUM_TRACKS] = [
    SoundDefinition {
        id: 1,
        name: "Rain",
        file: "rain.wav",
    },
    SoundDefinition {
        id: 2,
        name: "Coffee Shop",
        file: "coffee-shop.wav",
    },
    SoundDefinition {
        id: 3,
        name: "Birds",
        file: "birds.wav",
    },
    SoundDefinition {
        id: 4,
        name: "Fireplace",
        file: "fireplace.wav",
    },
];
