use std::fs;

use atc_vtt::convert::convert_dir;
use atc_vtt::{ConvertOpts, Error, OutputType};

const TAPE: &str = r#"(TAPE-HEADER "Boston Logan, local control")
((FROM AAL12) (TO TWR) (TEXT tower american twelve with you) (TIMES 1 2))
((FROM TWR) (TO AAL12) (TEXT american twelve (unintelligible) wind two seven zero) (TIMES 2.25 4.5))
((TAPE-TAIL "end of tape"))
"#;

#[test]
fn converts_a_directory_of_tapes() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("bos1.txt"), TAPE)?;
    fs::write(dir.path().join("notes.md"), "not a tape")?;

    let report = convert_dir(&ConvertOpts::new(dir.path()))?;
    assert_eq!(report.outcomes.len(), 1);
    assert!(!report.has_failures());

    let vtt = fs::read_to_string(dir.path().join("bos1.vtt"))?;
    assert_eq!(
        vtt,
        "WEBVTT\n\n\
         NOTE\nBoston Logan, local control\n\n\
         0:00:01.000 --> 0:00:02.000\nTower american twelve with you\n\n\
         0:00:02.250 --> 0:00:04.500\nAmerican twelve (unintelligible) wind two seven zero\n\n\
         NOTE\nend of tape\n\n"
    );
    Ok(())
}

#[test]
fn one_bad_tape_does_not_stop_the_rest() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("a.txt"), TAPE)?;
    fs::write(dir.path().join("b.txt"), "\"h\"\n((FROM A) (TEXT cut off")?;
    fs::write(dir.path().join("c.txt"), TAPE)?;

    let mut opts = ConvertOpts::new(dir.path());
    opts.jobs = Some(2);
    let report = convert_dir(&opts)?;

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.succeeded(), 2);

    let failed: Vec<_> = report.failures().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].path, dir.path().join("b.txt"));
    assert!(matches!(failed[0].result, Err(Error::File { .. })));

    assert!(dir.path().join("a.vtt").is_file());
    assert!(!dir.path().join("b.vtt").exists());
    assert!(dir.path().join("c.vtt").is_file());
    Ok(())
}

#[test]
fn writes_json_when_asked() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("bos1.txt"), TAPE)?;

    let mut opts = ConvertOpts::new(dir.path());
    opts.output_type = OutputType::Json;
    convert_dir(&opts)?;

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("bos1.json"))?)?;
    assert_eq!(json["header"], "Boston Logan, local control");
    let exchanges = json["exchanges"].as_array().expect("exchanges");
    assert_eq!(exchanges.len(), 2);
    assert_eq!(exchanges[1]["source"], "TWR");
    assert_eq!(exchanges[1]["destination"], "AAL12");
    assert_eq!(exchanges[1]["times"], serde_json::json!([2.25, 4.5]));
    Ok(())
}

#[test]
fn missing_directory_is_an_error() {
    let opts = ConvertOpts::new("/definitely/not/here");
    assert!(convert_dir(&opts).is_err());
}
