//! Cut tape audio into one clip per caption.
//!
//! Audio files are paired with caption tracks by file name, each track is read back into
//! captions, and every caption's time window is exported as `<tape>/part-<n>.<ext>`.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audio::{AudioBackend, ClipWindow};
use crate::batch::{BatchReport, Outcome, run_parallel};
use crate::caption::{Caption, read_captions_file};
use crate::diagnostic::{Diagnostic, report};
use crate::error::{Error, Result};
use crate::files::{find_files, stem};
use crate::opts::SplitOpts;

/// Extension of the caption tracks segmentation reads.
pub const CAPTION_TRACK_EXTENSION: &str = "vtt";

/// An audio file and the caption track that belongs to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapePair {
    /// Tape identity, taken from the audio file's stem. Names the output directory.
    pub tape: String,
    pub audio: PathBuf,
    pub captions: PathBuf,
}

/// Pair audio files with caption tracks.
///
/// A track whose stem equals the audio stem wins; otherwise the first track whose file name
/// contains the audio stem is used. Audio without a track, and tracks nothing paired with, are
/// reported as diagnostics.
pub fn match_assets(audio: &[PathBuf], tracks: &[PathBuf]) -> (Vec<TapePair>, Vec<Diagnostic>) {
    let mut pairs = Vec::new();
    let mut diagnostics = Vec::new();
    let mut used = BTreeSet::new();

    for audio_path in audio {
        let tape = stem(audio_path);

        let exact = tracks.iter().position(|t| stem(t) == tape);
        let found = exact.or_else(|| {
            tracks.iter().position(|t| {
                t.file_name()
                    .is_some_and(|name| name.to_string_lossy().contains(tape.as_str()))
            })
        });

        match found {
            Some(index) => {
                used.insert(index);
                pairs.push(TapePair {
                    tape,
                    audio: audio_path.clone(),
                    captions: tracks[index].clone(),
                });
            }
            None => report(
                &mut diagnostics,
                Diagnostic::UnmatchedAudio {
                    path: audio_path.clone(),
                },
            ),
        }
    }

    for (index, track) in tracks.iter().enumerate() {
        if !used.contains(&index) {
            report(
                &mut diagnostics,
                Diagnostic::UnmatchedCaptions {
                    path: track.clone(),
                },
            );
        }
    }

    (pairs, diagnostics)
}

/// Export one clip per caption into `output_dir/<tape>/part-<n>.<ext>`, `n` counting from 1.
///
/// The tape directory is created before the first clip, so a track with no captions leaves
/// nothing behind. Returns the written paths in caption order.
pub fn split_tape<B: AudioBackend>(
    backend: &B,
    tape: &str,
    captions: &[Caption],
    asset: &B::Asset,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let tape_dir = output_dir.join(tape);
    let total = captions.len();
    let mut written = Vec::with_capacity(total);

    for (n, caption) in (1..).zip(captions) {
        if written.is_empty() {
            fs::create_dir_all(&tape_dir).map_err(|e| Error::from(e).in_file(&tape_dir))?;
        }

        let dest = tape_dir.join(format!("part-{n}.{}", backend.clip_extension()));
        backend
            .export(asset, ClipWindow::from_caption(caption), &dest)
            .map_err(|e| e.in_file(&dest))?;

        tracing::debug!(tape, "{n} / {total}");
        written.push(dest);
    }

    Ok(written)
}

/// Read the pair's captions, load its audio and split it.
pub fn split_pair<B: AudioBackend>(
    backend: &B,
    pair: &TapePair,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let captions = read_captions_file(&pair.captions)?;
    let asset = backend
        .load(&pair.audio)
        .map_err(|e| e.in_file(&pair.audio))?;

    let written = split_tape(backend, &pair.tape, &captions, &asset, output_dir)?;
    tracing::info!(tape = %pair.tape, clips = written.len(), "split tape");
    Ok(written)
}

/// Split every paired tape under `opts.data_dir`.
///
/// Reads `audio/*.<audio_extension>` and `transcripts/*.vtt`. Fails only if the directories
/// cannot be listed or there are no caption tracks at all; per-tape failures are logged and
/// reported in the batch.
pub fn split_dir<B: AudioBackend>(
    backend: &B,
    opts: &SplitOpts,
) -> Result<BatchReport<Vec<PathBuf>>> {
    let audio = find_files(opts.audio_dir(), &opts.audio_extension)?;
    let transcripts_dir = opts.transcripts_dir();
    let tracks = find_files(&transcripts_dir, CAPTION_TRACK_EXTENSION)?;

    if tracks.is_empty() {
        return Err(Error::NoCaptionTracks {
            dir: transcripts_dir,
        });
    }

    let (pairs, diagnostics) = match_assets(&audio, &tracks);
    tracing::info!(tapes = pairs.len(), "splitting audio");

    let outcomes = run_parallel(&pairs, opts.jobs, |pair| {
        let result = split_pair(backend, pair, &opts.output_dir);
        if let Err(err) = &result {
            tracing::error!(tape = %pair.tape, error = %err, "split failed");
        }
        Outcome {
            path: pair.audio.clone(),
            result,
        }
    })?;

    Ok(BatchReport {
        outcomes,
        diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records exports instead of writing audio.
    #[derive(Default)]
    struct RecordingBackend {
        exports: Mutex<Vec<(ClipWindow, PathBuf)>>,
    }

    impl AudioBackend for RecordingBackend {
        type Asset = ();

        fn load(&self, _path: &Path) -> Result<()> {
            Ok(())
        }

        fn export(&self, _asset: &(), window: ClipWindow, dest: &Path) -> Result<()> {
            self.exports
                .lock()
                .map_err(|_| Error::msg("poisoned"))?
                .push((window, dest.to_path_buf()));
            Ok(())
        }

        fn clip_extension(&self) -> &str {
            "mp3"
        }
    }

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn matches_exact_stem_before_substring() {
        let audio = paths(&["audio/tape1.wav", "audio/tape2.wav", "audio/lonely.wav"]);
        let tracks = paths(&[
            "transcripts/tape10.vtt",
            "transcripts/tape1.vtt",
            "transcripts/old-tape2.vtt",
            "transcripts/spare.vtt",
        ]);

        let (pairs, diagnostics) = match_assets(&audio, &tracks);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].tape, "tape1");
        assert_eq!(pairs[0].captions, PathBuf::from("transcripts/tape1.vtt"));
        assert_eq!(pairs[1].captions, PathBuf::from("transcripts/old-tape2.vtt"));

        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnmatchedAudio {
                    path: "audio/lonely.wav".into()
                },
                Diagnostic::UnmatchedCaptions {
                    path: "transcripts/tape10.vtt".into()
                },
                Diagnostic::UnmatchedCaptions {
                    path: "transcripts/spare.vtt".into()
                },
            ]
        );
    }

    #[test]
    fn exports_one_numbered_clip_per_caption() -> anyhow::Result<()> {
        let out = tempfile::tempdir()?;
        let backend = RecordingBackend::default();
        let captions = vec![Caption::new("A", 0.0, 1.5), Caption::new("B", 1.5, 3.0)];

        let written = split_tape(&backend, "tape7", &captions, &(), out.path())?;

        let tape_dir = out.path().join("tape7");
        assert_eq!(
            written,
            vec![tape_dir.join("part-1.mp3"), tape_dir.join("part-2.mp3")]
        );
        assert!(tape_dir.is_dir());

        let exports = backend.exports.lock().expect("lock");
        let windows: Vec<_> = exports.iter().map(|(w, _)| *w).collect();
        assert_eq!(
            windows,
            vec![
                ClipWindow {
                    start_ms: 0,
                    end_ms: 1500
                },
                ClipWindow {
                    start_ms: 1500,
                    end_ms: 3000
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn no_captions_creates_no_directory() -> anyhow::Result<()> {
        let out = tempfile::tempdir()?;
        let written = split_tape(&RecordingBackend::default(), "empty", &[], &(), out.path())?;
        assert!(written.is_empty());
        assert!(!out.path().join("empty").exists());
        Ok(())
    }

    #[test]
    fn no_tracks_is_an_error() -> anyhow::Result<()> {
        let data = tempfile::tempdir()?;
        fs::create_dir(data.path().join("audio"))?;
        fs::create_dir(data.path().join("transcripts"))?;

        let opts = SplitOpts::new(data.path(), data.path().join("out"));
        let err = split_dir(&RecordingBackend::default(), &opts).unwrap_err();
        assert!(matches!(err, Error::NoCaptionTracks { .. }));
        Ok(())
    }
}
