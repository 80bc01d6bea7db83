use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::SoundbankConfig;

/// The mod's destination sound folder.
///
/// Publishing is destructive-then-rebuild: every previously published file is
/// deleted, then the whole set is regenerated from the current source list.
/// There is no rollback if a copy fails partway.
pub struct Soundbank {
    dir: PathBuf,
    prefix: String,
}

impl Soundbank {
    pub fn new(config: &SoundbankConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            prefix: config.prefix.clone(),
        }
    }

    /// Clear `<prefix>_*.wav` from the destination, then copy `files` in
    /// order as `<prefix>_<NN>.wav` with a 1-based, 2-digit index. Running it
    /// twice with the same input yields the same destination set.
    pub fn publish(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create sound bank directory {}", self.dir.display()))?;

        self.clear_published()?;

        let mut published = Vec::with_capacity(files.len());
        for (index, source) in files.iter().enumerate() {
            let target = self.dir.join(self.slot_name(index + 1, source));
            info!("Copying {} -> {}", source.display(), target.display());
            fs::copy(source, &target).with_context(|| {
                format!("Failed to copy {} to {}", source.display(), target.display())
            })?;
            published.push(target);
        }

        Ok(published)
    }

    fn clear_published(&self) -> Result<()> {
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read sound bank directory {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            let name = entry.file_name();
            let is_published = name
                .to_str()
                .is_some_and(|name| self.is_published_name(name));
            if path.is_file() && is_published {
                fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove stale {}", path.display()))?;
            }
        }

        Ok(())
    }

    fn slot_name(&self, index: usize, source: &Path) -> String {
        let ext = source
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("wav")
            .to_ascii_lowercase();
        format!("{}_{:02}.{}", self.prefix, index, ext)
    }

    /// Matches the `<prefix>_*.wav` glob the reference cleared with.
    fn is_published_name(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix.as_str())
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|rest| rest.to_ascii_lowercase().ends_with(".wav"))
    }
}
