pub use crate::audio::SampleBuffer;

/// The UI -> engine protocol. The engine can't load files (that would stall
/// the audio callback), so the UI thread decodes first and registers the
/// finished buffer, then drives playback by track index.
#[derive(Clone, Debug)]
pub enum AudioCommand {
    RegisterTrack { track: u8, buffer: SampleBuffer },

    /// Arm the lane gain from the stored volume and start a fresh loop voice.
    /// Silently ignored if no buffer is registered for the track.
    Play { track: u8, volume: f32 },

    /// Drop the active voice (and any in-flight fade) for the track.
    Stop { track: u8 },

    SetVolume { track: u8, volume: f32 },

    /// Sleep-timer expiry: ramp every audible lane's gain to zero over the
    /// given window, sample-accurately, then drop its voice.
    FadeOutAll { seconds: f32 },
}
