// End-to-end pipeline tests with a stub encoder standing in for ffmpeg.
//
// The stub script copies a pre-rendered mono WAV fixture over its final
// (output) argument and appends a line to an invocation log, so tests can
// assert how many times the encoder ran without a real ffmpeg install.

#![cfg(unix)]

use anyhow::Result;
use boombox_soundbank::config::{Config, EncoderConfig, LibraryConfig, SoundbankConfig};
use boombox_soundbank::{pipeline, WavInfo};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_wav(path: &Path, channels: u16) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 44100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for _ in 0..441 {
        for _ in 0..channels {
            writer.write_sample(0i16)?;
        }
    }
    writer.finalize()?;
    Ok(())
}

fn write_stub_encoder(dir: &Path, fixture: &Path, log: &Path) -> Result<PathBuf> {
    let script = dir.join("ffmpeg-stub.sh");
    let body = format!(
        "#!/bin/sh\nfor arg; do out=\"$arg\"; done\necho \"$@\" >> \"{}\"\ncp \"{}\" \"$out\"\n",
        log.display(),
        fixture.display()
    );
    fs::write(&script, body)?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    Ok(script)
}

fn write_failing_encoder(dir: &Path) -> Result<PathBuf> {
    let script = dir.join("ffmpeg-fail.sh");
    // Writes a partial output file before failing, like an interrupted encode
    let body = "#!/bin/sh\nfor arg; do out=\"$arg\"; done\necho junk > \"$out\"\nexit 1\n";
    fs::write(&script, body)?;
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;
    Ok(script)
}

struct TestRun {
    _temp: TempDir,
    music_dir: PathBuf,
    bank_dir: PathBuf,
    log: PathBuf,
    config: Config,
}

fn setup() -> Result<TestRun> {
    let temp = TempDir::new()?;
    let music_dir = temp.path().join("music");
    let bank_dir = temp.path().join("sounds");
    let log = temp.path().join("invocations.log");
    fs::create_dir_all(&music_dir)?;

    let fixture = temp.path().join("fixture.wav");
    write_wav(&fixture, 1)?;

    let ffmpeg = write_stub_encoder(temp.path(), &fixture, &log)?;
    let config = Config {
        encoder: EncoderConfig {
            ffmpeg_path: ffmpeg,
            sample_rate: 44100,
            channels: 1,
        },
        library: LibraryConfig {
            music_dir: music_dir.clone(),
        },
        soundbank: SoundbankConfig {
            dir: bank_dir.clone(),
            prefix: "boombox".to_string(),
        },
    };

    Ok(TestRun {
        _temp: temp,
        music_dir,
        bank_dir,
        log,
        config,
    })
}

fn invocation_count(log: &Path) -> usize {
    fs::read_to_string(log)
        .map(|text| text.lines().count())
        .unwrap_or(0)
}

fn sorted_names(dir: &Path) -> Result<Vec<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
        .collect::<Result<_>>()?;
    names.sort();
    Ok(names)
}

#[test]
fn test_empty_music_dir_is_a_clean_noop() -> Result<()> {
    let run = setup()?;

    fs::create_dir_all(&run.bank_dir)?;
    fs::write(run.bank_dir.join("boombox_01.wav"), b"keep")?;

    let summary = pipeline::run(&run.config)?;

    assert!(summary.published.is_empty());
    assert_eq!(summary.converted, 0);
    assert_eq!(
        invocation_count(&run.log),
        0,
        "Empty library must not invoke the encoder"
    );
    assert_eq!(
        fs::read(run.bank_dir.join("boombox_01.wav"))?,
        b"keep",
        "Sound bank must be left untouched"
    );

    Ok(())
}

#[test]
fn test_mp3_inputs_produce_matching_wavs_and_publish() -> Result<()> {
    let run = setup()?;

    fs::write(run.music_dir.join("b.mp3"), b"mp3")?;
    fs::write(run.music_dir.join("a.mp3"), b"mp3")?;

    let summary = pipeline::run(&run.config)?;

    // Each mp3 gets a same-base-name wav sibling before normalization
    assert!(run.music_dir.join("a.wav").is_file());
    assert!(run.music_dir.join("b.wav").is_file());

    // Two transcodes plus two normalizations
    assert_eq!(invocation_count(&run.log), 4);

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.normalized, 2);
    assert_eq!(
        sorted_names(&run.bank_dir)?,
        ["boombox_01.wav", "boombox_02.wav"]
    );

    Ok(())
}

#[test]
fn test_normalization_replaces_wav_in_place() -> Result<()> {
    let run = setup()?;

    let track = run.music_dir.join("x.wav");
    write_wav(&track, 2)?;

    let summary = pipeline::run(&run.config)?;

    assert!(track.is_file(), "Original path must survive normalization");
    let header = WavInfo::read(&track)?;
    assert_eq!(header.channels, 1, "Track should be mono after normalization");
    assert!(header.matches(44100, 1));

    assert_eq!(summary.normalized, 1);
    assert!(
        !run.music_dir.join("x.tmp.wav").exists(),
        "Temp file must not survive a successful run"
    );

    Ok(())
}

#[test]
fn test_missing_encoder_fails_preflight() -> Result<()> {
    let mut run = setup()?;
    run.config.encoder.ffmpeg_path = run.music_dir.join("no-such-ffmpeg");

    fs::write(run.music_dir.join("song.wav"), b"wav")?;

    let result = pipeline::run(&run.config);
    assert!(result.is_err(), "Missing encoder must abort the run");
    assert_eq!(invocation_count(&run.log), 0);
    assert!(
        !run.bank_dir.exists(),
        "Nothing should be published after a preflight failure"
    );

    Ok(())
}

#[test]
fn test_encoder_failure_aborts_and_removes_temp() -> Result<()> {
    let mut run = setup()?;
    run.config.encoder.ffmpeg_path = write_failing_encoder(run._temp.path())?;

    let track = run.music_dir.join("song.wav");
    write_wav(&track, 2)?;
    let original = fs::read(&track)?;

    let result = pipeline::run(&run.config);
    assert!(result.is_err(), "Encoder failure must abort the run");

    assert_eq!(
        fs::read(&track)?,
        original,
        "Original must be untouched when normalization fails"
    );
    assert!(
        !run.music_dir.join("song.tmp.wav").exists(),
        "Partial temp file should be cleaned up"
    );
    assert!(!run.bank_dir.exists(), "Publish must not run after a failure");

    Ok(())
}

#[test]
fn test_mp3_next_to_same_named_wav_publishes_once() -> Result<()> {
    let run = setup()?;

    fs::write(run.music_dir.join("a.mp3"), b"mp3")?;
    write_wav(&run.music_dir.join("a.wav"), 1)?;

    let summary = pipeline::run(&run.config)?;

    assert_eq!(summary.normalized, 1, "a.wav must be processed once");
    assert_eq!(sorted_names(&run.bank_dir)?, ["boombox_01.wav"]);

    Ok(())
}

#[test]
fn test_rerun_yields_identical_bank() -> Result<()> {
    let run = setup()?;

    write_wav(&run.music_dir.join("a.wav"), 1)?;
    write_wav(&run.music_dir.join("b.wav"), 1)?;

    pipeline::run(&run.config)?;
    let first = sorted_names(&run.bank_dir)?;

    pipeline::run(&run.config)?;
    let second = sorted_names(&run.bank_dir)?;

    assert_eq!(first, second);
    assert_eq!(second, ["boombox_01.wav", "boombox_02.wav"]);

    Ok(())
}
