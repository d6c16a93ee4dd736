use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;

pub mod engine;
mod frame;
pub mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;

use engine::Engine;

// Largest block we ever mix in one callback; anything bigger gets rendered
// in slices so the scratch buffer never reallocates on the audio thread.
const MAX_BLOCK: usize = 4096;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _output_stream: cpal::Stream, // keeps the stream alive; dropped on quit
}

impl AudioHandle {
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    /// The device rate every catalog buffer gets resampled to.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(256);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream =
                build_output_stream_f32(&device, &config.into(), rx, sample_rate, channels)?;
            output_stream
                .play()
                .context("failed to play output stream")?;

            Ok(AudioHandle {
                tx,
                sample_rate,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    sample_rate: u32,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new(sample_rate);
    let mut scratch = vec![StereoFrame::zero(); MAX_BLOCK];

    let err_fn = |err| eprintln!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }

            for chunk in data.chunks_mut(MAX_BLOCK * channels) {
                let n_frames = chunk.len() / channels;
                let frames = &mut scratch[..n_frames];
                engine.render_block(frames);

                for (i, frame) in frames.iter().enumerate() {
                    let slot = &mut chunk[i * channels..(i + 1) * channels];
                    match channels {
                        1 => slot[0] = 0.5 * (frame.left + frame.right),
                        _ => {
                            slot[0] = frame.left;
                            slot[1] = frame.right;
                            for s in &mut slot[2..] {
                                *s = 0.0;
                            }
                        }
                    }
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
