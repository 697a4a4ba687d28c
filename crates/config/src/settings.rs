use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use vidtally_utils::VideoExtensions;
use vidtally_utils::media_types::DEFAULT_VIDEO_EXTENSIONS;

const APP_DIR: &str = "vidtally";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default = "default_video_extensions")]
    pub video_extensions: Vec<String>,
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    #[serde(default = "default_ffprobe_path")]
    pub ffprobe_path: PathBuf,
}

// Default value functions for serde
fn default_video_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS.iter().map(|ext| (*ext).to_string()).collect()
}
fn default_probe_timeout_secs() -> u64 {
    10
}
fn default_ffprobe_path() -> PathBuf {
    PathBuf::from("ffprobe")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            video_extensions: default_video_extensions(),
            probe_timeout_secs: default_probe_timeout_secs(),
            ffprobe_path: default_ffprobe_path(),
        }
    }
}

impl Settings {
    /// Loads settings from the user config directory, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or if the
    /// config file exists but cannot be read or parsed.
    pub async fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?).await
    }

    /// Loads settings from `path`; a missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path).await?;
            let settings: Self = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }

    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        info!("Settings saved to {:?}", path);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the configured list contains no usable extension.
    pub fn extensions(&self) -> Result<VideoExtensions> {
        Ok(VideoExtensions::new(&self.video_extensions)?)
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs.max(1))
    }

    /// # Errors
    ///
    /// Returns an error if the user config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| color_eyre::eyre::eyre!("Could not find config directory"))?;
        Ok(config_dir.join(APP_DIR).join(CONFIG_FILE))
    }
}
