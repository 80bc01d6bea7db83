use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::LibraryConfig;

/// Contents of the source music folder, split by extension.
///
/// Discovery is extension-only (no content inspection) and case-insensitive,
/// matching the Windows globbing the folder was originally consumed with.
#[derive(Debug, Default)]
pub struct Library {
    /// Compressed files awaiting decode, lexically sorted
    pub mp3_files: Vec<PathBuf>,
    /// PCM files, lexically sorted
    pub wav_files: Vec<PathBuf>,
}

impl Library {
    /// Scan the music folder, creating it first if absent.
    pub fn scan(config: &LibraryConfig) -> Result<Self> {
        let dir = &config.music_dir;
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create music directory {}", dir.display()))?;

        let mut mp3_files = Vec::new();
        let mut wav_files = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("Failed to read music directory {}", dir.display()))?
        {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if has_extension(&path, "mp3") {
                mp3_files.push(path);
            } else if has_extension(&path, "wav") {
                wav_files.push(path);
            }
        }

        mp3_files.sort();
        wav_files.sort();

        info!(
            "Found {} mp3 file(s) and {} wav file(s) in {}",
            mp3_files.len(),
            wav_files.len(),
            dir.display()
        );

        Ok(Self { mp3_files, wav_files })
    }

    pub fn is_empty(&self) -> bool {
        self.mp3_files.is_empty() && self.wav_files.is_empty()
    }
}

fn has_extension(path: &Path, wanted: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}
