use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::{info, warn};

/// WAV header summary, read back after normalization to confirm the encoder
/// produced the target format.
#[derive(Debug, Clone, Copy)]
pub struct WavInfo {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavInfo {
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file {}", path.display()))?;

        let spec = reader.spec();
        let duration_seconds = reader.duration() as f64 / spec.sample_rate as f64;

        Ok(Self {
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
        })
    }

    /// Log the header; warn when it does not match the target format. Never
    /// fails the run, the file already replaced its original at this point.
    pub fn report(&self, path: &Path, target_rate: u32, target_channels: u16) {
        info!(
            "{}: {:.1}s, {} Hz, {} channel(s), {}-bit",
            path.display(),
            self.duration_seconds,
            self.sample_rate,
            self.channels,
            self.bits_per_sample
        );

        if !self.matches(target_rate, target_channels) {
            warn!(
                "{} is {} Hz / {} channel(s) / {}-bit, expected {} Hz / {} channel(s) / 16-bit",
                path.display(),
                self.sample_rate,
                self.channels,
                self.bits_per_sample,
                target_rate,
                target_channels
            );
        }
    }

    pub fn matches(&self, target_rate: u32, target_channels: u16) -> bool {
        self.sample_rate == target_rate
            && self.channels == target_channels
            && self.bits_per_sample == 16
    }
}
