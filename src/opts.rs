use std::path::PathBuf;

use crate::output_type::OutputType;

/// Audio extension the segmentation stage looks for unless told otherwise.
pub const DEFAULT_AUDIO_EXTENSION: &str = "wav";

/// Options for converting a directory of tape transcripts into caption tracks.
///
/// This is library-level configuration, not CLI flags. Binaries map their arguments into it;
/// tests and other callers build it directly.
#[derive(Debug, Clone)]
pub struct ConvertOpts {
    /// Directory holding the `.txt` tape files. Tracks are written next to them.
    pub input_dir: PathBuf,

    /// Format of the written tracks.
    pub output_type: OutputType,

    /// Worker threads; `None` means one per CPU.
    pub jobs: Option<usize>,
}

impl ConvertOpts {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_type: OutputType::default(),
            jobs: None,
        }
    }
}

/// Options for cutting tape audio into per-caption clips.
#[derive(Debug, Clone)]
pub struct SplitOpts {
    /// Data directory with `audio/` and `transcripts/` subdirectories.
    pub data_dir: PathBuf,

    /// Clips are written to `<output_dir>/<tape>/part-<n>.<ext>`.
    pub output_dir: PathBuf,

    /// Extension (without the dot) of the audio files to pick up.
    pub audio_extension: String,

    /// Worker threads; `None` means one per CPU.
    pub jobs: Option<usize>,
}

impl SplitOpts {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            audio_extension: DEFAULT_AUDIO_EXTENSION.to_owned(),
            jobs: None,
        }
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.data_dir.join("audio")
    }

    pub fn transcripts_dir(&self) -> PathBuf {
        self.data_dir.join("transcripts")
    }
}
