use anyhow::{bail, Context, Result};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

use crate::config::EncoderConfig;

/// Wrapper around the external ffmpeg binary.
///
/// Both invocation shapes are the same fixed argument list
/// (`-y -i <in> -acodec pcm_s16le -ac N -ar R <out>`); they differ only in
/// whether the output is a new sibling WAV or a temporary file that replaces
/// the input.
pub struct Encoder {
    ffmpeg: PathBuf,
    sample_rate: u32,
    channels: u16,
}

impl Encoder {
    /// Preflight: the configured executable must exist. No retries, a missing
    /// binary is a fatal configuration error.
    pub fn new(config: &EncoderConfig) -> Result<Self> {
        if !config.ffmpeg_path.exists() {
            bail!("ffmpeg not found at {}", config.ffmpeg_path.display());
        }

        Ok(Self {
            ffmpeg: config.ffmpeg_path.clone(),
            sample_rate: config.sample_rate,
            channels: config.channels,
        })
    }

    /// Decode a compressed file into a PCM WAV written at `output`.
    pub fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        info!("Converting {} -> {}", file_name(input), file_name(output));
        self.run(input, output)
    }

    /// Force the configured channel count, sample rate and bit depth in place:
    /// encode into a `.tmp.wav` sibling, then atomically rename it over the
    /// original. The original is either fully replaced or left untouched.
    pub fn normalize(&self, wav: &Path) -> Result<()> {
        info!("Normalizing channels {}", file_name(wav));

        let tmp = tmp_path(wav);
        if let Err(err) = self.run(wav, &tmp) {
            // The reference tool left the partial temp file behind; remove it
            // best-effort. The run aborts either way.
            if tmp.exists() {
                if let Err(remove_err) = fs::remove_file(&tmp) {
                    warn!(
                        "Could not remove partial temp file {}: {}",
                        tmp.display(),
                        remove_err
                    );
                }
            }
            return Err(err);
        }

        fs::rename(&tmp, wav)
            .with_context(|| format!("Failed to replace {} with normalized copy", wav.display()))?;

        Ok(())
    }

    fn run(&self, input: &Path, output: &Path) -> Result<()> {
        let result = Command::new(&self.ffmpeg)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-acodec", "pcm_s16le"])
            .arg("-ac")
            .arg(self.channels.to_string())
            .arg("-ar")
            .arg(self.sample_rate.to_string())
            .arg(output)
            .output()
            .with_context(|| format!("Failed to launch ffmpeg at {}", self.ffmpeg.display()))?;

        if !result.status.success() {
            bail!(
                "ffmpeg exited with {} while encoding {}: {}",
                result.status,
                input.display(),
                stderr_tail(&result.stderr)
            );
        }

        Ok(())
    }
}

/// `song.wav` -> `song.tmp.wav`, alongside the original.
fn tmp_path(wav: &Path) -> PathBuf {
    wav.with_extension("tmp.wav")
}

fn file_name(path: &Path) -> Cow<'_, str> {
    match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => path.to_string_lossy(),
    }
}

/// Last few non-empty stderr lines, for the error message. ffmpeg prints its
/// whole banner to stderr, so the full stream is too noisy to surface.
fn stderr_tail(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(3);
    lines[start..].join(" | ")
}
