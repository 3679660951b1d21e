use std::fs;
use std::path::Path;

use atc_vtt::convert::convert_dir;
use atc_vtt::split::split_dir;
use atc_vtt::{ConvertOpts, SplitOpts, WavBackend};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

const RATE: u32 = 8000;

fn write_tone(path: &Path, seconds: u32) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for i in 0..RATE * seconds {
        writer.write_sample(if i % 2 == 0 { 1000i16 } else { -1000 })?;
    }
    writer.finalize()?;
    Ok(())
}

fn frames(path: &Path) -> anyhow::Result<u32> {
    Ok(WavReader::open(path)?.duration())
}

#[test]
fn transcripts_to_clips() -> anyhow::Result<()> {
    let data = tempfile::tempdir()?;
    let audio = data.path().join("audio");
    let transcripts = data.path().join("transcripts");
    fs::create_dir(&audio)?;
    fs::create_dir(&transcripts)?;

    write_tone(&audio.join("tape3.wav"), 4)?;
    fs::write(
        transcripts.join("tape3.txt"),
        "\"hdr\"\n\
         ((FROM A) (TO B) (TEXT first) (TIMES 0 1.5))\n\
         ((FROM B) (TO A) (TEXT second) (TIMES 1.5 3.0))\n",
    )?;

    let converted = convert_dir(&ConvertOpts::new(&transcripts))?;
    assert!(!converted.has_failures());

    let out = data.path().join("split");
    let report = split_dir(&WavBackend, &SplitOpts::new(data.path(), &out))?;
    assert!(!report.has_failures());
    assert!(report.diagnostics.is_empty());

    let clips = report.outcomes[0].result.as_ref().expect("split");
    assert_eq!(
        clips,
        &vec![out.join("tape3/part-1.wav"), out.join("tape3/part-2.wav")]
    );
    assert_eq!(frames(&clips[0])?, 12_000);
    assert_eq!(frames(&clips[1])?, 12_000);
    Ok(())
}

#[test]
fn unmatched_files_are_reported_not_fatal() -> anyhow::Result<()> {
    let data = tempfile::tempdir()?;
    let audio = data.path().join("audio");
    let transcripts = data.path().join("transcripts");
    fs::create_dir(&audio)?;
    fs::create_dir(&transcripts)?;

    write_tone(&audio.join("orphan.wav"), 1)?;
    fs::write(
        transcripts.join("other.vtt"),
        "WEBVTT\n\n0:00:00.000 --> 0:00:00.500\nHi\n\n",
    )?;

    let report = split_dir(&WavBackend, &SplitOpts::new(data.path(), data.path().join("out")))?;
    assert!(report.outcomes.is_empty());
    assert_eq!(report.diagnostics.len(), 2);
    assert!(!data.path().join("out").exists());
    Ok(())
}

#[test]
fn undecodable_audio_fails_only_that_tape() -> anyhow::Result<()> {
    let data = tempfile::tempdir()?;
    let audio = data.path().join("audio");
    let transcripts = data.path().join("transcripts");
    fs::create_dir(&audio)?;
    fs::create_dir(&transcripts)?;

    let track = "WEBVTT\n\n0:00:00.000 --> 0:00:00.500\nHi\n\n";
    write_tone(&audio.join("good.wav"), 1)?;
    fs::write(audio.join("bad.wav"), b"garbage")?;
    fs::write(transcripts.join("good.vtt"), track)?;
    fs::write(transcripts.join("bad.vtt"), track)?;

    let out = data.path().join("out");
    let report = split_dir(&WavBackend, &SplitOpts::new(data.path(), &out))?;

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert!(out.join("good/part-1.wav").is_file());
    assert!(!out.join("bad").exists());
    Ok(())
}
