use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::Config;
use crate::encoder::Encoder;
use crate::library::Library;
use crate::probe::WavInfo;
use crate::soundbank::Soundbank;

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of mp3 files decoded to wav
    pub converted: usize,
    /// Number of wav files channel/rate-normalized
    pub normalized: usize,
    /// Paths published into the sound bank, in slot order
    pub published: Vec<PathBuf>,
}

/// Run the whole pipeline: preflight, discover, convert, normalize, publish.
///
/// Strictly sequential; any encoder failure aborts the run. An empty music
/// folder is not an error: the sound bank is left untouched and no encoder
/// invocation happens.
pub fn run(config: &Config) -> Result<RunSummary> {
    let encoder = Encoder::new(&config.encoder)?;
    let library = Library::scan(&config.library)?;

    if library.is_empty() {
        info!("No audio files found in {}", config.library.music_dir.display());
        return Ok(RunSummary::default());
    }

    let mut wav_files = library.wav_files.clone();
    for mp3 in &library.mp3_files {
        let wav = mp3.with_extension("wav");
        encoder.transcode(mp3, &wav)?;
        wav_files.push(wav);
    }

    // An mp3 dropped next to its already-converted wav lands in the list
    // twice; the published set must hold each track once.
    wav_files.sort();
    wav_files.dedup();

    for wav in &wav_files {
        encoder.normalize(wav)?;
        match WavInfo::read(wav) {
            Ok(header) => header.report(wav, config.encoder.sample_rate, config.encoder.channels),
            Err(err) => warn!("Could not read back {}: {:#}", wav.display(), err),
        }
    }

    let published = Soundbank::new(&config.soundbank).publish(&wav_files)?;
    info!(
        "All {} track(s) normalized and copied into the mod sound bank",
        published.len()
    );

    Ok(RunSummary {
        converted: library.mp3_files.len(),
        normalized: wav_files.len(),
        published,
    })
}
