use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::Result;

/// Write interleaved `f32` samples as a 16-bit PCM WAV file.
///
/// Samples outside `[-1.0, 1.0]` are clipped.
pub fn write_wav_clip(path: &Path, sample_rate: u32, channels: u16, samples: &[f32]) -> Result<()> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in samples {
        let pcm = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer.write_sample(pcm)?;
    }
    writer.finalize()?;

    Ok(())
}
