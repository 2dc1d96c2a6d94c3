//! Client config load/save for `~/.techquiry/config.yaml`.

use std::path::{Path, PathBuf};

/// API section (base_url, optional whole-call timeout).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ApiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Whole-call timeout in seconds. Unset means no client-side deadline;
    /// transport-level timeouts still apply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// UI section (error toast display time).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UiSection {
    /// Milliseconds the error toast stays open after the latest error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_time_ms: Option<u64>,
}

/// Full client config.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiSection,
}

/// Returns the default config file path: `~/.techquiry/config.yaml`.
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".techquiry").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Io(e.to_string()))
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io(e.to_string()))?;
        }
    }
    let contents = serde_yaml::to_string(config).map_err(|e| ConfigError::Io(e.to_string()))?;
    std::fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))
}

/// Config load/save error.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(s) => write!(f, "IO error: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}
