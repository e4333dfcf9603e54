//! Application-level utilities for the Lynx CLI.
//!
//! - Application context bundling CLI flags with lazily-loaded config
//! - Path resolution for the config and attempt-counter files

mod context;
mod resolver;

pub use context::AppContext;
pub use resolver::{resolve_attempts_path, resolve_config_path};
