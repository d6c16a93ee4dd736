use crate::audio_api::AudioCommand;
use crate::mixer::presets::{PresetId, preset_names};
use crate::mixer::state::MixerState;
use crate::mixer::timer::{SleepTimer, TimerTick};
use crate::shared::{
    DisplayState, FADE_OUT_SECS, InputEvent, Theme, TimerDisplay, TrackDisplay, TrackStatus,
};

/// Bookkeeping for the post-expiry fade window. The engine does the audible
/// ramp on its own clock and retires each voice itself; this only remembers
/// which tracks to flip to paused once the window has elapsed on our ticker.
/// Tracks the user touches mid-fade leave the set so no stale flip hits them.
struct FadeOut {
    remaining: f64,
    tracks: Vec<u8>,
}

/// The state brain of the mixer. The TUI feeds it semantic input events and
/// renders whatever `display_state` says; the audio engine receives the
/// command batches these methods return. All mutation happens synchronously
/// on the UI thread, one event at a time.
pub struct Middle {
    pub state: MixerState,
    pub timer: SleepTimer,
    fade: Option<FadeOut>,
    theme: Theme,
}

impl Middle {
    pub fn new(theme: Theme) -> Self {
        Self {
            state: MixerState::default(),
            timer: SleepTimer::default(),
            fade: None,
            theme,
        }
    }

    // ── input handling ────────────────────────────────────────────

    pub fn handle_input(&mut self, event: InputEvent) -> Vec<AudioCommand> {
        match event {
            InputEvent::ToggleTrack(i) => self.toggle_play(i),
            InputEvent::ToggleSelected => self.toggle_play(self.state.selected),
            InputEvent::SelectNext => {
                self.state.selected = (self.state.selected + 1) % self.state.tracks.len() as u8;
                vec![]
            }
            InputEvent::SelectPrev => {
                let n = self.state.tracks.len() as u8;
                self.state.selected = (self.state.selected + n - 1) % n;
                vec![]
            }
            InputEvent::VolumeDelta(delta) => {
                let selected = self.state.selected;
                let current = match self.state.track(selected) {
                    Some(t) => t.state.volume,
                    None => return vec![],
                };
                self.set_volume(selected, current + delta)
            }
            InputEvent::ApplyPreset(i) => self.apply_preset(i),
            InputEvent::TimerPress => {
                if self.timer.running {
                    self.timer.cancel();
                } else {
                    self.timer.start();
                }
                vec![]
            }
            InputEvent::TimerAdjust(mins) => {
                self.timer.adjust(mins);
                vec![]
            }
            // theme, reload and quit are orchestrated by main; nothing for
            // the engine to do
            InputEvent::ToggleTheme | InputEvent::Reload | InputEvent::Quit => vec![],
        }
    }

    /// Play/pause one track. A no-op unless the track's buffer finished
    /// decoding; the playing flag and the engine voice flip together within
    /// this single call, so they can never disagree between events.
    pub fn toggle_play(&mut self, index: u8) -> Vec<AudioCommand> {
        let Some(entry) = self.state.track_mut(index) else {
            return vec![];
        };
        if entry.status != TrackStatus::Ready {
            return vec![];
        }

        if entry.state.playing {
            entry.state.playing = false;
            self.unfade(index);
            vec![AudioCommand::Stop { track: index }]
        } else {
            entry.state.playing = true;
            let volume = entry.state.volume;
            vec![AudioCommand::Play {
                track: index,
                volume,
            }]
        }
    }

    pub fn set_volume(&mut self, index: u8, volume: f32) -> Vec<AudioCommand> {
        let Some(entry) = self.state.track_mut(index) else {
            return vec![];
        };
        let volume = volume.clamp(0.0, 1.0);
        entry.state.volume = volume;
        vec![AudioCommand::SetVolume {
            track: index,
            volume,
        }]
    }

    /// Swap in a whole preset: stop everything first so no voice survives
    /// the state replacement, replace every track's state, then start the
    /// tracks the preset marks playing. Unknown indices do nothing.
    pub fn apply_preset(&mut self, index: u8) -> Vec<AudioCommand> {
        let Some(id) = PresetId::from_index(index) else {
            return vec![];
        };
        let mut cmds = Vec::new();

        for i in self.state.playing_tracks() {
            self.state.tracks[i as usize].state.playing = false;
            cmds.push(AudioCommand::Stop { track: i });
        }
        self.fade = None;

        let states = id.states();
        for (i, preset_state) in states.iter().enumerate() {
            self.state.tracks[i].state.volume = preset_state.volume;
        }
        for (i, preset_state) in states.iter().enumerate() {
            let entry = &mut self.state.tracks[i];
            if preset_state.playing && entry.status == TrackStatus::Ready {
                entry.state.playing = true;
                cmds.push(AudioCommand::Play {
                    track: i as u8,
                    volume: preset_state.volume,
                });
            }
        }
        cmds
    }

    // ── timer / fade ──────────────────────────────────────────────

    /// Called once per frame with the elapsed wall-clock seconds. Drives the
    /// countdown and, after expiry, the fade-window bookkeeping.
    pub fn tick(&mut self, elapsed: f64) -> Vec<AudioCommand> {
        let mut cmds = Vec::new();

        if self.timer.tick(elapsed) == TimerTick::Expired {
            let fading = self.state.playing_tracks();
            if !fading.is_empty() {
                self.fade = Some(FadeOut {
                    remaining: FADE_OUT_SECS as f64,
                    tracks: fading,
                });
                cmds.push(AudioCommand::FadeOutAll {
                    seconds: FADE_OUT_SECS,
                });
            }
        } else if let Some(fade) = &mut self.fade {
            fade.remaining -= elapsed;
            if fade.remaining <= 0.0 {
                let tracks = std::mem::take(&mut fade.tracks);
                self.fade = None;
                // the engine already dropped these voices when its ramp hit
                // zero; here the playing flags catch up
                for i in tracks {
                    if let Some(entry) = self.state.track_mut(i) {
                        entry.state.playing = false;
                    }
                }
            }
        }

        cmds
    }

    fn unfade(&mut self, index: u8) {
        if let Some(fade) = &mut self.fade {
            fade.tracks.retain(|&t| t != index);
            if fade.tracks.is_empty() {
                self.fade = None;
            }
        }
    }

    fn is_fading(&self, index: u8) -> bool {
        self.fade
            .as_ref()
            .is_some_and(|f| f.tracks.contains(&index))
    }

    // ── load status ───────────────────────────────────────────────

    pub fn mark_ready(&mut self, index: u8) {
        if let Some(entry) = self.state.track_mut(index) {
            entry.status = TrackStatus::Ready;
        }
    }

    pub fn mark_unavailable(&mut self, index: u8) {
        if let Some(entry) = self.state.track_mut(index) {
            entry.status = TrackStatus::Unavailable;
            entry.state.playing = false;
        }
    }

    /// Tracks whose load failed, for the user-triggered reload pass.
    pub fn unavailable_tracks(&self) -> Vec<u8> {
        self.state
            .tracks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.status == TrackStatus::Unavailable)
            .map(|(i, _)| i as u8)
            .collect()
    }

    // ── theme ─────────────────────────────────────────────────────

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    // ── display ───────────────────────────────────────────────────

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            tracks: std::array::from_fn(|i| {
                let entry = &self.state.tracks[i];
                TrackDisplay {
                    name: entry.def.name,
                    playing: entry.state.playing,
                    volume: entry.state.volume,
                    status: entry.status,
                    fading: self.is_fading(i as u8),
                }
            }),
            selected: self.state.selected,
            preset_names: preset_names(),
            timer: TimerDisplay {
                running: self.timer.running,
                duration_mins: self.timer.duration_mins,
                remaining_secs: self.timer.remaining_secs,
                initial_secs: self.timer.initial_secs,
            },
            theme: self.theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::StereoFrame;
    use crate::audio::engine::Engine;
    use crate::audio::sample_buffer::SampleBuffer;
    use crate::shared::NUM_TRACKS;

    fn ready_middle() -> Middle {
        let mut middle = Middle::new(Theme::Dark);
        for i in 0..NUM_TRACKS as u8 {
            middle.mark_ready(i);
        }
        middle
    }

    fn playing_flags(middle: &Middle) -> Vec<bool> {
        middle.state.tracks.iter().map(|t| t.state.playing).collect()
    }

    #[test]
    fn toggle_twice_returns_to_the_original_state() {
        let mut middle = ready_middle();

        let cmds = middle.toggle_play(0);
        assert!(matches!(cmds[..], [AudioCommand::Play { track: 0, .. }]));
        assert!(middle.state.tracks[0].state.playing);

        let cmds = middle.toggle_play(0);
        assert!(matches!(cmds[..], [AudioCommand::Stop { track: 0 }]));
        assert!(!middle.state.tracks[0].state.playing);
    }

    #[test]
    fn toggle_is_inert_while_loading_or_unavailable() {
        let mut middle = Middle::new(Theme::Dark); // everything still Loading
        assert!(middle.toggle_play(0).is_empty());
        assert!(!middle.state.tracks[0].state.playing);

        middle.mark_unavailable(0);
        assert!(middle.toggle_play(0).is_empty());
        assert!(!middle.state.tracks[0].state.playing);
    }

    #[test]
    fn play_carries_the_stored_volume() {
        let mut middle = ready_middle();
        middle.set_volume(2, 0.9);
        let cmds = middle.toggle_play(2);
        assert!(matches!(
            cmds[..],
            [AudioCommand::Play { track: 2, volume }] if volume == 0.9
        ));
    }

    #[test]
    fn set_volume_clamps_and_leaves_playing_untouched() {
        let mut middle = ready_middle();
        middle.toggle_play(1);

        let cmds = middle.set_volume(1, 1.7);
        assert!(matches!(
            cmds[..],
            [AudioCommand::SetVolume { track: 1, volume }] if volume == 1.0
        ));
        assert!(middle.state.tracks[1].state.playing);

        middle.set_volume(1, -0.3);
        assert_eq!(middle.state.tracks[1].state.volume, 0.0);
        assert!(middle.state.tracks[1].state.playing);
    }

    #[test]
    fn volume_delta_applies_to_the_selected_track() {
        let mut middle = ready_middle();
        middle.handle_input(InputEvent::SelectNext);
        middle.handle_input(InputEvent::VolumeDelta(0.05));
        assert!((middle.state.tracks[1].state.volume - 0.55).abs() < 1e-6);
        assert_eq!(middle.state.tracks[0].state.volume, 0.5);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut middle = ready_middle();
        middle.handle_input(InputEvent::SelectPrev);
        assert_eq!(middle.state.selected, NUM_TRACKS as u8 - 1);
        middle.handle_input(InputEvent::SelectNext);
        assert_eq!(middle.state.selected, 0);
    }

    #[test]
    fn rainy_cafe_from_all_paused() {
        let mut middle = ready_middle();
        let cmds = middle.apply_preset(0);

        assert_eq!(playing_flags(&middle), vec![true, true, false, false]);
        assert_eq!(middle.state.tracks[0].state.volume, 0.7);
        assert_eq!(middle.state.tracks[1].state.volume, 0.5);
        assert_eq!(middle.state.tracks[2].state.volume, 0.5);
        assert_eq!(middle.state.tracks[3].state.volume, 0.5);

        // nothing was playing, so no stops; exactly two starts
        assert_eq!(cmds.len(), 2);
        assert!(matches!(cmds[0], AudioCommand::Play { track: 0, .. }));
        assert!(matches!(cmds[1], AudioCommand::Play { track: 1, .. }));
    }

    #[test]
    fn preset_switch_stops_everything_before_starting_anything() {
        let mut middle = ready_middle();
        middle.apply_preset(0); // Rainy Cafe: tracks 0 and 1 playing
        let cmds = middle.apply_preset(1); // Forest Morning: only track 2

        let first_play = cmds
            .iter()
            .position(|c| matches!(c, AudioCommand::Play { .. }))
            .unwrap();
        let last_stop = cmds
            .iter()
            .rposition(|c| matches!(c, AudioCommand::Stop { .. }))
            .unwrap();
        assert!(last_stop < first_play);

        let stops = cmds
            .iter()
            .filter(|c| matches!(c, AudioCommand::Stop { .. }))
            .count();
        assert_eq!(stops, 2); // both Rainy Cafe tracks stopped
        assert_eq!(playing_flags(&middle), vec![false, false, true, false]);
    }

    #[test]
    fn unknown_preset_index_is_a_no_op() {
        let mut middle = ready_middle();
        middle.toggle_play(0);
        let before = playing_flags(&middle);
        assert!(middle.apply_preset(9).is_empty());
        assert_eq!(playing_flags(&middle), before);
    }

    #[test]
    fn preset_does_not_mark_an_unavailable_track_playing() {
        let mut middle = ready_middle();
        middle.mark_unavailable(0);
        let cmds = middle.apply_preset(0); // wants track 0 playing

        assert!(!middle.state.tracks[0].state.playing);
        assert!(middle.state.tracks[1].state.playing);
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], AudioCommand::Play { track: 1, .. }));
    }

    #[test]
    fn timer_expiry_fades_then_pauses_playing_tracks() {
        let mut middle = ready_middle();
        middle.toggle_play(0);
        middle.toggle_play(1);
        middle.handle_input(InputEvent::TimerAdjust(-25)); // 30 -> 5 minutes
        middle.handle_input(InputEvent::TimerPress);

        let cmds = middle.tick(5.0 * 60.0 + 0.5);
        assert!(matches!(cmds[..], [AudioCommand::FadeOutAll { .. }]));

        // during the fade window the flags are still up, and marked fading
        assert_eq!(playing_flags(&middle), vec![true, true, false, false]);
        let ds = middle.display_state();
        assert!(ds.tracks[0].fading && ds.tracks[1].fading);
        assert!(!ds.tracks[2].fading);

        // one tick past the window everything lands paused
        middle.tick(FADE_OUT_SECS as f64 + 1.0);
        assert_eq!(playing_flags(&middle), vec![false, false, false, false]);
        assert!(!middle.display_state().tracks[0].fading);
    }

    #[test]
    fn timer_expiry_with_nothing_playing_sends_nothing() {
        let mut middle = ready_middle();
        middle.handle_input(InputEvent::TimerAdjust(-25));
        middle.handle_input(InputEvent::TimerPress);
        assert!(middle.tick(5.0 * 60.0 + 0.5).is_empty());
    }

    #[test]
    fn cancelling_the_timer_leaves_playback_untouched() {
        let mut middle = ready_middle();
        middle.toggle_play(0);
        middle.handle_input(InputEvent::TimerPress);
        middle.tick(10.0);
        middle.handle_input(InputEvent::TimerPress); // cancel

        assert!(!middle.timer.running);
        assert_eq!(playing_flags(&middle), vec![true, false, false, false]);
        // and no fade ever fires later
        assert!(middle.tick(1000.0).is_empty());
        assert!(middle.state.tracks[0].state.playing);
    }

    #[test]
    fn toggling_mid_fade_escapes_the_pending_pause() {
        let mut middle = ready_middle();
        middle.toggle_play(0);
        middle.toggle_play(1);
        middle.handle_input(InputEvent::TimerAdjust(-25));
        middle.handle_input(InputEvent::TimerPress);
        middle.tick(5.0 * 60.0 + 0.5); // expired, fade running

        // user pauses track 0 mid-fade, then starts it again fresh
        middle.toggle_play(0);
        middle.toggle_play(0);
        assert!(middle.state.tracks[0].state.playing);

        // the fade deadline passes; only track 1 gets flipped
        middle.tick(FADE_OUT_SECS as f64 + 1.0);
        assert_eq!(playing_flags(&middle), vec![true, false, false, false]);
    }

    #[test]
    fn preset_mid_fade_clears_the_fade_set() {
        let mut middle = ready_middle();
        middle.toggle_play(0);
        middle.handle_input(InputEvent::TimerAdjust(-25));
        middle.handle_input(InputEvent::TimerPress);
        middle.tick(5.0 * 60.0 + 0.5);

        middle.apply_preset(1); // Forest Morning
        middle.tick(FADE_OUT_SECS as f64 + 1.0);
        // the preset's track survives; the fade from before doesn't touch it
        assert_eq!(playing_flags(&middle), vec![false, false, true, false]);
    }

    // Drive the middle and the engine together (no device needed) and check
    // the core invariant: a lane has a voice exactly when the state says the
    // track is playing.
    #[test]
    fn engine_voice_presence_matches_playing_flags() {
        const RATE: u32 = 1000;
        let mut middle = ready_middle();
        let mut engine = Engine::new(RATE);
        for i in 0..NUM_TRACKS as u8 {
            engine.handle_cmd(AudioCommand::RegisterTrack {
                track: i,
                buffer: SampleBuffer {
                    data: vec![StereoFrame { left: 0.5, right: 0.5 }; 32],
                },
            });
        }

        let apply = |middle: &mut Middle, engine: &mut Engine, cmds: Vec<AudioCommand>| {
            for cmd in cmds {
                engine.handle_cmd(cmd);
            }
            for i in 0..NUM_TRACKS as u8 {
                assert_eq!(
                    engine.is_playing(i),
                    middle.state.tracks[i as usize].state.playing,
                    "track {i} out of sync"
                );
            }
        };

        let cmds = middle.toggle_play(0);
        apply(&mut middle, &mut engine, cmds);
        let cmds = middle.apply_preset(0);
        apply(&mut middle, &mut engine, cmds);
        let cmds = middle.apply_preset(2);
        apply(&mut middle, &mut engine, cmds);
        let cmds = middle.set_volume(3, 0.1);
        apply(&mut middle, &mut engine, cmds);
        let cmds = middle.toggle_play(0);
        apply(&mut middle, &mut engine, cmds);

        // timer expiry: engine ramps down while flags stay up, then both
        // sides settle paused within the window (+1 tick on our side)
        middle.handle_input(InputEvent::TimerAdjust(-25));
        middle.handle_input(InputEvent::TimerPress);
        let cmds = middle.tick(5.0 * 60.0 + 0.5);
        for cmd in cmds {
            engine.handle_cmd(cmd);
        }
        let mut out = [StereoFrame::zero(); 250];
        for _ in 0..((FADE_OUT_SECS as usize * RATE as usize) / out.len() + 1) {
            engine.render_block(&mut out);
        }
        middle.tick(FADE_OUT_SECS as f64 + 1.0);
        for i in 0..NUM_TRACKS as u8 {
            assert!(!engine.is_playing(i));
            assert!(!middle.state.tracks[i as usize].state.playing);
        }
    }
}
