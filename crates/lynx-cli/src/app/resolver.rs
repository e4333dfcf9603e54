//! Path resolution for config and state files.

use std::path::PathBuf;

use crate::config::{default_attempts_path, default_config_path};
use crate::constants::env_vars;

/// Resolve the config file path, checking `LYNX_CONFIG` first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var(env_vars::CONFIG) {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the failed-attempt counter file.
pub fn resolve_attempts_path() -> anyhow::Result<PathBuf> {
    default_attempts_path()
}
