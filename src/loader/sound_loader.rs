use std::path::Path;

use crate::audio::SampleBuffer;
use crate::mixer::catalog::SoundDefinition;

// Decode one catalog entry from the asset dir, resampled to the device rate
// and ready to register with the engine
pub fn load(def: &SoundDefinition, assets_dir: &Path, target_rate: u32) -> anyhow::Result<SampleBuffer> {
    SampleBuffer::load_wav(&assets_dir.join(def.file), target_rate)
}
