use std::path::Path;

use super::frame::StereoFrame;

/// A fully decoded track, resampled to the output device rate. Decoding
/// happens on the UI thread before the buffer is handed to the engine; the
/// audio callback only ever reads it.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>,
}

impl SampleBuffer {
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => {
                reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?
            }
            hound::SampleFormat::Int => {
                // scale ints down to -1.0..1.0
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let frames: Vec<StereoFrame> = match spec.channels {
            1 => samples
                .into_iter()
                .map(|x| StereoFrame { left: x, right: x })
                .collect(),
            2 => samples
                .chunks_exact(2)
                .map(|c| StereoFrame {
                    left: c[0],
                    right: c[1],
                })
                .collect(),
            n => anyhow::bail!("unsupported channel count {n} in {}", path.display()),
        };

        if frames.is_empty() {
            anyhow::bail!("empty audio file {}", path.display());
        }

        Ok(Self {
            data: resample_linear(&frames, spec.sample_rate, target_rate),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

// Linear resampler. The catalog is a handful of ambience loops, so this only
// runs a few times at startup and quality-wise linear is plenty for rain.
fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx >= frames.len().saturating_sub(1) {
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<StereoFrame> {
        (0..n)
            .map(|i| StereoFrame {
                left: i as f32,
                right: i as f32,
            })
            .collect()
    }

    #[test]
    fn resample_same_rate_is_identity() {
        let frames = ramp(100);
        let out = resample_linear(&frames, 44100, 44100);
        assert_eq!(out.len(), frames.len());
        assert_eq!(out[37], frames[37]);
    }

    #[test]
    fn resample_doubles_length_when_upsampling_2x() {
        let frames = ramp(100);
        let out = resample_linear(&frames, 22050, 44100);
        assert_eq!(out.len(), 200);
        // midpoint between source samples 0 and 1
        assert!((out[1].left - 0.5).abs() < 1e-6);
    }

    #[test]
    fn resample_halves_length_when_downsampling_2x() {
        let frames = ramp(100);
        let out = resample_linear(&frames, 44100, 22050);
        assert_eq!(out.len(), 50);
        assert!((out[10].left - 20.0).abs() < 1e-6);
    }

    #[test]
    fn load_wav_duplicates_mono_into_both_channels() {
        let dir = std::env::temp_dir().join("lull-test-wav");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("mono.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..64i16 {
            writer.write_sample(i * 256).unwrap();
        }
        writer.finalize().unwrap();

        let buf = SampleBuffer::load_wav(&path, 48000).unwrap();
        assert_eq!(buf.len(), 64);
        assert_eq!(buf.data[10].left, buf.data[10].right);
    }

    #[test]
    fn load_wav_missing_file_is_an_error() {
        let err = SampleBuffer::load_wav(Path::new("/definitely/not/here.wav"), 48000);
        assert!(err.is_err());
    }
}
