//! Tape transcripts to caption tracks, one file or a whole directory.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::batch::{BatchReport, Outcome, run_parallel};
use crate::error::{Error, Result};
use crate::files::find_files;
use crate::opts::ConvertOpts;
use crate::output_type::OutputType;
use crate::transcript::Transcript;

/// Extension of tape transcript files.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// What converting one tape produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Converted {
    /// The written caption track.
    pub output: PathBuf,
    pub exchanges: usize,
    pub diagnostics: usize,
}

/// Parse the tape at `path` and write its caption track next to it, with the extension swapped
/// for the output format's.
pub fn convert_file(path: &Path, output_type: OutputType) -> Result<Converted> {
    let transcript = Transcript::from_file(path)?;
    let output = path.with_extension(output_type.extension());

    let file = File::create(&output).map_err(|e| Error::from(e).in_file(&output))?;
    transcript
        .write_captions(BufWriter::new(file), output_type)
        .map_err(|e| e.in_file(&output))?;

    Ok(Converted {
        output,
        exchanges: transcript.exchanges.len(),
        diagnostics: transcript.diagnostics.len(),
    })
}

/// Convert every tape in `opts.input_dir`.
///
/// Files are converted in parallel. A file that fails is logged and reported in the returned
/// batch; it does not stop the others. Only failing to list the directory is an error here.
pub fn convert_dir(opts: &ConvertOpts) -> Result<BatchReport<Converted>> {
    let inputs = find_files(&opts.input_dir, TRANSCRIPT_EXTENSION)?;
    tracing::info!(
        dir = %opts.input_dir.display(),
        tapes = inputs.len(),
        "converting transcripts"
    );

    let outcomes = run_parallel(&inputs, opts.jobs, |path| {
        let result = convert_file(path, opts.output_type);
        if let Err(err) = &result {
            tracing::error!(error = %err, "conversion failed");
        }
        Outcome {
            path: path.clone(),
            result,
        }
    })?;

    Ok(BatchReport {
        outcomes,
        diagnostics: Vec::new(),
    })
}
