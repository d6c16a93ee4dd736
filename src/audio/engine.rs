use crate::audio_api::AudioCommand;
use crate::shared::NUM_TRACKS;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::LoopVoice;

/// One mixer lane per catalog track. The gain lives as long as the engine;
/// the voice only exists while the track is playing. That pairing is the
/// whole playback state machine: Stopped (voice None) <-> Playing (voice Some).
struct Lane {
    buffer: Option<SampleBuffer>,
    voice: Option<LoopVoice>,
    gain: f32,
    /// Gain units subtracted per frame while a fade-out is running.
    fade_step: Option<f32>,
}

impl Lane {
    fn new() -> Self {
        Self {
            buffer: None,
            voice: None,
            gain: 0.0,
            fade_step: None,
        }
    }
}

pub struct Engine {
    sample_rate: f32,
    lanes: [Lane; NUM_TRACKS],
}

impl Engine {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate as f32,
            lanes: std::array::from_fn(|_| Lane::new()),
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterTrack { track, buffer } => {
                if let Some(lane) = self.lanes.get_mut(track as usize) {
                    lane.buffer = Some(buffer);
                    lane.voice = None;
                    lane.fade_step = None;
                }
            }
            AudioCommand::Play { track, volume } => {
                if let Some(lane) = self.lanes.get_mut(track as usize) {
                    // no buffer means the track never finished loading; a
                    // play request for it is a guarded no-op
                    if lane.buffer.is_some() {
                        lane.gain = volume;
                        lane.fade_step = None;
                        lane.voice = Some(LoopVoice::new());
                    }
                }
            }
            AudioCommand::Stop { track } => {
                if let Some(lane) = self.lanes.get_mut(track as usize) {
                    lane.voice = None;
                    lane.fade_step = None;
                }
            }
            AudioCommand::SetVolume { track, volume } => {
                if let Some(lane) = self.lanes.get_mut(track as usize) {
                    lane.gain = volume;
                }
            }
            AudioCommand::FadeOutAll { seconds } => {
                let total_frames = (seconds * self.sample_rate).max(1.0);
                for lane in self.lanes.iter_mut() {
                    if lane.voice.is_none() {
                        continue;
                    }
                    if lane.gain <= 0.0 {
                        // already silent, nothing to ramp
                        lane.voice = None;
                    } else {
                        lane.fade_step = Some(lane.gain / total_frames);
                    }
                }
            }
        }
    }

    /// Mix all audible lanes into `out`. Runs inside the audio callback, so
    /// no allocation and no locking in here.
    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        for frame in out.iter_mut() {
            *frame = StereoFrame::zero();
        }

        for lane in self.lanes.iter_mut() {
            let Lane {
                buffer,
                voice,
                gain,
                fade_step,
            } = lane;
            let Some(buffer) = buffer else { continue };

            for frame in out.iter_mut() {
                let Some(v) = voice.as_mut() else { break };
                let sample = v.next_frame(buffer);
                frame.left += sample.left * *gain;
                frame.right += sample.right * *gain;

                if let Some(step) = *fade_step {
                    *gain -= step;
                    if *gain <= 0.0 {
                        // ramp finished; retire the voice
                        *gain = 0.0;
                        *voice = None;
                        *fade_step = None;
                    }
                }
            }
        }
    }

    /// Whether the track currently has an active loop voice. Exposed for the
    /// state-machine tests; the UI thread never reaches in here.
    #[cfg(test)]
    pub fn is_playing(&self, track: u8) -> bool {
        self.lanes
            .get(track as usize)
            .map(|l| l.voice.is_some())
            .unwrap_or(false)
    }

    #[cfg(test)]
    pub fn gain(&self, track: u8) -> f32 {
        self.lanes[track as usize].gain
    }
}
