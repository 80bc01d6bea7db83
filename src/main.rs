use anyhow::Result;
use boombox_soundbank::{pipeline, Config};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "boombox-soundbank")]
#[command(about = "Convert a music folder into the boombox mod's sound bank")]
struct Args {
    /// Configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Override the ffmpeg executable path
    #[arg(long)]
    ffmpeg: Option<PathBuf>,

    /// Override the source music directory
    #[arg(long)]
    music_dir: Option<PathBuf>,

    /// Override the destination sounds directory
    #[arg(long)]
    sounds_dir: Option<PathBuf>,

    /// Publish stereo files instead of mono
    #[arg(long)]
    stereo: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ffmpeg) = args.ffmpeg {
        cfg.encoder.ffmpeg_path = ffmpeg;
    }
    if let Some(dir) = args.music_dir {
        cfg.library.music_dir = dir;
    }
    if let Some(dir) = args.sounds_dir {
        cfg.soundbank.dir = dir;
    }
    if args.stereo {
        cfg.encoder.channels = 2;
    }

    info!("Boombox sound bank converter");
    info!("Music folder: {}", cfg.library.music_dir.display());
    info!("Sound bank: {}", cfg.soundbank.dir.display());
    info!(
        "Target format: {} Hz, {} channel(s), 16-bit PCM",
        cfg.encoder.sample_rate, cfg.encoder.channels
    );

    let summary = pipeline::run(&cfg)?;

    if summary.published.is_empty() {
        info!("Nothing to publish");
    } else {
        info!(
            "Converted {} mp3(s), published {} track(s)",
            summary.converted,
            summary.published.len()
        );
    }

    Ok(())
}
