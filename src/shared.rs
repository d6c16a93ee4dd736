// The input plan:
//
// Tracks:
//   1 2 3 4       //  ToggleTrack(0 or ... or 3)
//   j / k         //  SelectNext / SelectPrev (move the track cursor)
//   Space         //  toggle the selected track
//   [ / ]         //  VolumeDelta(-0.05 or 0.05) on the selected track
//
// Presets:
//   a s d         //  ApplyPreset(0 or 1 or 2)
//
// Sleep timer:
//   - / =         //  TimerAdjust(-5 or 5 minutes, only while idle)
//   t             //  TimerPress (start when idle, cancel when running)
//
// Misc:
//   m             //  ToggleTheme (persisted immediately)
//   r             //  Reload any tracks that failed to load
//   Esc           //  Quit
//
// The rendering idea is the same split as always: the middle layer owns every
// bit of mixer state, and each frame the TUI just asks it for a DisplayState
// and draws that. The view never mutates anything.

use serde::{Deserialize, Serialize};

pub const NUM_TRACKS: usize = 4;

/// How long the sleep-timer fade takes once the countdown hits zero, in seconds.
pub const FADE_OUT_SECS: f32 = 10.0;

#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    // track controls
    ToggleTrack(u8), // index 0-3
    ToggleSelected,
    SelectNext,
    SelectPrev,
    VolumeDelta(f32),

    // preset buttons
    ApplyPreset(u8), // index into the preset table

    // sleep timer
    TimerPress,
    TimerAdjust(i32), // minutes

    // theme toggle (handled in main so it can hit the settings file)
    ToggleTheme,

    // retry loading tracks that came up Unavailable (also handled in main,
    // it's the only event that touches the filesystem)
    Reload,

    Quit,
}

/// Per-track load status. A track that failed to decode stays visible in the
/// UI as unavailable instead of silently ignoring presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackStatus {
    Loading,
    Ready,
    Unavailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DisplayState {
    pub tracks: [TrackDisplay; NUM_TRACKS],
    pub selected: u8,
    pub preset_names: [&'static str; 3],
    pub timer: TimerDisplay,
    pub theme: Theme,
}

#[derive(Clone, Debug)]
pub struct TrackDisplay {
    pub name: &'static str,
    pub playing: bool,
    pub volume: f32,
    pub status: TrackStatus,
    pub fading: bool, // timer expired, gain ramping down right now
}

#[derive(Clone, Copy, Debug)]
pub struct TimerDisplay {
    pub running: bool,
    pub duration_mins: u32,
    pub remaining_secs: u32,
    pub initial_secs: u32,
}

impl TimerDisplay {
    /// Fraction of the countdown still left, for the progress gauge.
    pub fn progress(&self) -> f64 {
        if self.initial_secs == 0 {
            0.0
        } else {
            self.remaining_secs as f64 / self.initial_secs as f64
        }
    }
}
