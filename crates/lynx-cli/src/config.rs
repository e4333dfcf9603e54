use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lynx_core::auth::{DEFAULT_INSTANCE, DEFAULT_MAX_FAILED_ATTEMPTS};
use lynx_core::crypto::{Digest, DEFAULT_PASSWORD_LENGTH};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LynxConfig {
    #[serde(default)]
    pub auth: AuthSection,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthSection {
    /// SHA-256 digest of the API token; the token itself is never stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_digest: Option<Digest>,
    #[serde(default = "default_max_failed_attempts")]
    pub max_failed_attempts: u32,
    #[serde(default = "default_instance")]
    pub instance: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            token_digest: None,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            instance: default_instance(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorSection {
    #[serde(default = "default_password_length")]
    pub length: usize,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            length: DEFAULT_PASSWORD_LENGTH,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_max_failed_attempts() -> u32 {
    DEFAULT_MAX_FAILED_ATTEMPTS
}

fn default_instance() -> String {
    DEFAULT_INSTANCE.to_string()
}

fn default_password_length() -> usize {
    DEFAULT_PASSWORD_LENGTH
}

fn default_log_level() -> String {
    "warn".to_string()
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_attempts_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("attempts.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<LynxConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

/// Read the config at `path`, or defaults when it does not exist.
pub fn load_or_default(path: &Path) -> anyhow::Result<LynxConfig> {
    if path.exists() {
        read_config(path)
    } else {
        Ok(LynxConfig::default())
    }
}

pub fn write_config(path: &Path, config: &LynxConfig) -> anyhow::Result<()> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    lynx_core::fs::write_atomic(path, contents.as_bytes())
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("lynx"));
        }
    }
    Ok(home_dir()?.join(".config").join("lynx"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("lynx"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("lynx"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
