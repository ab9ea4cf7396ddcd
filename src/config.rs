use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const ENV_BASE_URL: &str = "CLOUDTUI_API_BASE_URL";
pub const ENV_TIMEOUT: &str = "CLOUDTUI_API_TIMEOUT";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
    pub vim_mode: bool,
    pub icon_mode: String,
    /// Program used to open previewed files externally (receives the file path)
    pub open_command: Option<String>,
    pub download_dir: Option<PathBuf>,
    /// Where preview scratch files are written
    pub scratch_dir: Option<PathBuf>,
    pub log_level: String,
    pub image_preview_enabled: bool,
    pub image_protocol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
            vim_mode: false,
            icon_mode: "nerdfont".to_string(),
            open_command: None,
            download_dir: None,
            scratch_dir: None,
            log_level: "debug".to_string(),
            image_preview_enabled: true,
            image_protocol: "auto".to_string(),
        }
    }
}

impl Config {
    /// Read a YAML config file; missing keys take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Apply `CLOUDTUI_API_BASE_URL` / `CLOUDTUI_API_TIMEOUT` from the environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(
            std::env::var(ENV_BASE_URL).ok(),
            std::env::var(ENV_TIMEOUT).ok(),
        )
    }

    fn apply_overrides(&mut self, base_url: Option<String>, timeout: Option<String>) -> Result<()> {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(timeout) = timeout.filter(|t| !t.trim().is_empty()) {
            self.timeout_ms = timeout
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds", ENV_TIMEOUT))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .unwrap_or_else(crate::utils::default_download_dir)
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .clone()
            .unwrap_or_else(crate::utils::default_scratch_dir)
    }
}

/// Locate the config file: `--config`, then the platform config dir, then `./config.yaml`
///
/// An explicit path that does not exist is an error; otherwise a missing
/// file just means "use defaults".
pub fn get_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("cloudtui").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}
