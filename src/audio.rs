//! The audio side of segmentation: loaded assets, clip windows and the backend seam.

use std::ops::Range;
use std::path::Path;

use crate::caption::Caption;
use crate::error::Result;

/// Decoded audio held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioAsset {
    /// Interleaved samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioAsset {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    /// Interleaved samples covering `window`, clamped to the asset.
    pub fn window(&self, window: ClipWindow) -> &[f32] {
        let frames = window.frame_range(self.sample_rate, self.frames());
        let channels = usize::from(self.channels.max(1));
        &self.samples[frames.start * channels..frames.end * channels]
    }
}

/// A `[start, end)` window in whole milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl ClipWindow {
    /// Window for a caption: both bounds truncated to whole milliseconds.
    pub fn from_caption(caption: &Caption) -> Self {
        Self {
            start_ms: (caption.start * 1000.0) as u64,
            end_ms: (caption.end * 1000.0) as u64,
        }
    }

    /// Frame indices covered at `sample_rate`, clamped to `total_frames`. A window that ends
    /// before it starts is empty.
    pub fn frame_range(&self, sample_rate: u32, total_frames: usize) -> Range<usize> {
        let to_frame = |ms: u64| {
            let frame = ms.saturating_mul(u64::from(sample_rate)) / 1000;
            usize::try_from(frame).map_or(total_frames, |f| f.min(total_frames))
        };

        let start = to_frame(self.start_ms);
        let end = to_frame(self.end_ms).max(start);
        start..end
    }
}

/// The audio collaborator segmentation talks to.
///
/// One asset is only ever used by one export sequence at a time, so backends need not make
/// `export` safe for concurrent windows on the same asset.
pub trait AudioBackend: Sync {
    type Asset: Send;

    /// Load the audio file at `path` into something windows can be cut from.
    fn load(&self, path: &Path) -> Result<Self::Asset>;

    /// Write the part of `asset` covered by `window` to `dest`.
    fn export(&self, asset: &Self::Asset, window: ClipWindow, dest: &Path) -> Result<()>;

    /// Extension (without the dot) of the clips `export` writes.
    fn clip_extension(&self) -> &str;
}

/// Decodes with Symphonia and writes 16-bit PCM WAV clips at the source rate and channel count.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavBackend;

impl AudioBackend for WavBackend {
    type Asset = AudioAsset;

    fn load(&self, path: &Path) -> Result<AudioAsset> {
        crate::decoder::load_audio(path)
    }

    fn export(&self, asset: &AudioAsset, window: ClipWindow, dest: &Path) -> Result<()> {
        crate::wav::write_wav_clip(dest, asset.sample_rate, asset.channels, asset.window(window))
    }

    fn clip_extension(&self) -> &str {
        "wav"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo_ramp(frames: usize) -> AudioAsset {
        let samples = (0..frames)
            .flat_map(|f| [f as f32, -(f as f32)])
            .collect();
        AudioAsset {
            samples,
            sample_rate: 1000,
            channels: 2,
        }
    }

    #[test]
    fn window_truncates_to_milliseconds() {
        let w = ClipWindow::from_caption(&Caption::new("x", 1.5, 3.0009));
        assert_eq!(
            w,
            ClipWindow {
                start_ms: 1500,
                end_ms: 3000
            }
        );
    }

    #[test]
    fn frame_range_scales_and_clamps() {
        let w = ClipWindow {
            start_ms: 500,
            end_ms: 2000,
        };
        assert_eq!(w.frame_range(8000, 100_000), 4000..16000);
        assert_eq!(w.frame_range(8000, 10_000), 4000..10_000);
        assert_eq!(w.frame_range(8000, 1_000), 1_000..1_000);

        let reversed = ClipWindow {
            start_ms: 2000,
            end_ms: 500,
        };
        assert!(reversed.frame_range(8000, 100_000).is_empty());
    }

    #[test]
    fn asset_window_keeps_frames_interleaved() {
        let asset = stereo_ramp(10);
        assert_eq!(asset.frames(), 10);

        let clip = asset.window(ClipWindow {
            start_ms: 2,
            end_ms: 4,
        });
        assert_eq!(clip, [2.0f32, -2.0, 3.0, -3.0].as_slice());
    }

    #[test]
    fn adjacent_captions_neither_overlap_nor_gap() {
        let asset = stereo_ramp(3000);
        let first = asset.window(ClipWindow::from_caption(&Caption::new("a", 0.0, 1.5)));
        let second = asset.window(ClipWindow::from_caption(&Caption::new("b", 1.5, 3.0)));
        assert_eq!(first.len() + second.len(), asset.samples.len());
        assert_eq!(second[0], 1500.0);
    }
}
