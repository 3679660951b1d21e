use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use atc_vtt::convert::convert_dir;
use atc_vtt::logging::{self, LogFormat};
use atc_vtt::{ConvertOpts, OutputType};

fn main() -> Result<ExitCode> {
    let params = Params::parse();
    logging::init(params.log_format);

    let opts = ConvertOpts {
        input_dir: params.transcripts_dir,
        output_type: params.output_type,
        jobs: params.jobs,
    };

    let report = convert_dir(&opts)?;

    for outcome in &report.outcomes {
        if let Ok(converted) = &outcome.result {
            println!(
                "{} -> {} ({} exchanges, {} diagnostics)",
                outcome.path.display(),
                converted.output.display(),
                converted.exchanges,
                converted.diagnostics
            );
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
#[command(name = "tapes-to-vtt")]
#[command(about = "Convert ATC tape transcripts into caption tracks")]
struct Params {
    /// Directory holding the `.txt` tape transcripts. Tracks are written next to them.
    transcripts_dir: PathBuf,

    #[arg(
        short = 'o',
        long = "output-type",
        value_enum,
        default_value_t = OutputType::Vtt
    )]
    output_type: OutputType,

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
    fn parses_defaults() {
        let params = Params::parse_from(["tapes-to-vtt", "data/transcripts"]);
        assert_eq!(params.transcripts_dir, PathBuf::from("data/transcripts"));
        assert_eq!(params.output_type, OutputType::Vtt);
        assert_eq!(params.jobs, None);
        assert_eq!(params.log_format, LogFormat::Text);
    }

    #[test]
    fn parses_flags() {
        let params = Params::parse_from(["tapes-to-vtt", "t", "-o", "json", "-j", "3"]);
        assert_eq!(params.output_type, OutputType::Json);
        assert_eq!(params.jobs, Some(3));
    }

    #[test]
    fn requires_a_directory() {
        assert!(Params::try_parse_from(["tapes-to-vtt"]).is_err());
    }
}
