// src/config/mod.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "persona-gui";
const ENV_PREFIX: &str = "PERSONA";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub capture: CaptureConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    pub frame_count: usize,
    pub frame_delay_ms: u64,
    pub device: String,
    /// Longest a single ffmpeg grab may run before it is killed
    pub grab_timeout_ms: u64,
    /// ffmpeg demuxer for the camera (`v4l2`, `avfoundation`, `dshow`)
    pub input_format: String,
    pub ffmpeg: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            capture: CaptureConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_count: 8,
            frame_delay_ms: 150,
            device: "/dev/video0".to_string(),
            grab_timeout_ms: 5000,
            input_format: "v4l2".to_string(),
            ffmpeg: "ffmpeg".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CaptureConfig {
    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }

    pub fn grab_timeout(&self) -> Duration {
        Duration::from_millis(self.grab_timeout_ms)
    }
}

impl AppConfig {
    /// Loads defaults, then the user config file, then `./persona.toml`,
    /// then `PERSONA__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self> {
        let user_file = config_dir().map(|dir| dir.join("config.toml"));
        Self::load_from(user_file.as_deref(), Some(Path::new("persona.toml")))
    }

    pub fn load_from(user_file: Option<&Path>, local_file: Option<&Path>) -> Result<Self> {
        let defaults = AppConfig::default();
        let mut builder = ::config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default("capture.frame_count", defaults.capture.frame_count as u64)?
            .set_default("capture.frame_delay_ms", defaults.capture.frame_delay_ms)?
            .set_default("capture.device", defaults.capture.device)?
            .set_default("capture.grab_timeout_ms", defaults.capture.grab_timeout_ms)?
            .set_default("capture.input_format", defaults.capture.input_format)?
            .set_default("capture.ffmpeg", defaults.capture.ffmpeg)?;

        for path in [user_file, local_file].into_iter().flatten() {
            builder = builder.add_source(::config::File::from(path.to_path_buf()).required(false));
        }

        builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Where reports are written: configured dir, else the download dir,
    /// else the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export.dir.clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}
