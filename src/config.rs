use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub encoder: EncoderConfig,
    pub library: LibraryConfig,
    pub soundbank: SoundbankConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Path to the external ffmpeg executable
    pub ffmpeg_path: PathBuf,
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Forced channel count (1 = mono, 2 = stereo variant)
    pub channels: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Folder the user drops music files into
    pub music_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoundbankConfig {
    /// The mod's Sounds folder
    pub dir: PathBuf,
    /// Published filename prefix (`<prefix>_<NN>.wav`)
    pub prefix: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(
                r"C:\Program Files (x86)\Steam\steamapps\common\7 Days To Die\Mods\1_Boombox\ffmpeg\ffmpeg-8.0-essentials_build\bin\ffmpeg.exe",
            ),
            sample_rate: 44100,
            channels: 1,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            music_dir: PathBuf::from(r"C:\BoomboxMusic"),
        }
    }
}

impl Default for SoundbankConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(
                r"C:\Program Files (x86)\Steam\steamapps\common\7 Days To Die\Mods\1_Boombox\Sounds",
            ),
            prefix: "boombox".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
