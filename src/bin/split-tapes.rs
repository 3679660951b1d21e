use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use atc_vtt::logging::{self, LogFormat};
use atc_vtt::opts::DEFAULT_AUDIO_EXTENSION;
use atc_vtt::split::split_dir;
use atc_vtt::{SplitOpts, WavBackend};

fn main() -> Result<ExitCode> {
    let params = Params::parse();
    logging::init(params.log_format);

    let opts = SplitOpts {
        data_dir: params.data_dir,
        output_dir: params.output_dir,
        audio_extension: params.audio_extension,
        jobs: params.jobs,
    };

    let report = split_dir(&WavBackend, &opts)?;

    for outcome in &report.outcomes {
        if let Ok(clips) = &outcome.result {
            println!("{}: {} clip(s)", outcome.path.display(), clips.len());
        }
    }

    let failed = report.failures().count();
    if failed > 0 {
        eprintln!("{failed} of {} tape(s) failed", report.outcomes.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

#[derive(Parser, Debug)]
#[command(name = "split-tapes")]
#[command(about = "Cut tape audio into one clip per caption")]
struct Params {
    /// Data directory with `audio/` and `transcripts/` (run tapes-to-vtt on it first).
    data_dir: PathBuf,

    /// Where `<tape>/part-<n>.wav` clips are written.
    output_dir: PathBuf,

    /// Extension of the audio files to split.
    #[arg(long = "audio-ext", default_value = DEFAULT_AUDIO_EXTENSION)]
    audio_extension: String,

    /// Worker threads (default: one per CPU).
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,

    #[arg(long = "log-format", value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_directories() {
        let params = Params::parse_from(["split-tapes", "atc0/data", "split"]);
        assert_eq!(params.data_dir, PathBuf::from("atc0/data"));
        assert_eq!(params.output_dir, PathBuf::from("split"));
        assert_eq!(params.audio_extension, "wav");
    }

    #[test]
    fn requires_an_output_directory() {
        assert!(Params::try_parse_from(["split-tapes", "atc0/data"]).is_err());
    }
}
