use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::platform;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where uploads go and how the multipart body is shaped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Full URL of the upload endpoint, including the path.
    #[serde(default = "default_endpoint_url")]
    pub url: String,
    /// Name of the single multipart field carrying the file.
    #[serde(default = "default_field_name")]
    pub field_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds a success message stays on screen.
    #[serde(default = "default_success_dismiss_secs")]
    pub success_dismiss_secs: u64,
    /// Capture mouse events (hover highlight on the drop target, click to upload).
    #[serde(default = "default_mouse_capture")]
    pub mouse_capture: bool,
}

impl UiConfig {
    pub fn success_dismiss(&self) -> Duration {
        Duration::from_secs(self.success_dismiss_secs)
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_endpoint_url(),
            field_name: default_field_name(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            success_dismiss_secs: default_success_dismiss_secs(),
            mouse_capture: default_mouse_capture(),
        }
    }
}

fn default_endpoint_url() -> String {
    "http://127.0.0.1:5000/upload".to_string()
}

fn default_field_name() -> String {
    "file".to_string()
}

fn default_success_dismiss_secs() -> u64 {
    5
}

fn default_mouse_capture() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from `path`, writing a default config there first if none exists.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}
