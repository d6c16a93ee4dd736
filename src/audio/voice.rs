use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;

/// A looping read head over one decoded track. Created fresh on every play
/// and thrown away on stop; the lane's gain is what persists across plays.
#[derive(Clone, Copy, Debug)]
pub struct LoopVoice {
    pos: usize,
}

impl LoopVoice {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    /// Read the next frame, wrapping back to the start at the end of the
    /// buffer. Ambience loops are authored to be seamless, so a hard wrap
    /// is fine here.
    pub fn next_frame(&mut self, buffer: &SampleBuffer) -> StereoFrame {
        if buffer.data.is_empty() {
            return StereoFrame::zero();
        }
        let frame = buffer.data[self.pos];
        self.pos += 1;
        if self.pos >= buffer.data.len() {
            self.pos = 0;
        }
        frame
    }
}
