//! Application context for the Lynx CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config so handlers take a
//! single parameter.

use once_cell::unsync::OnceCell;

use lynx_core::auth::{FileAttemptStore, TokenGate};
use lynx_core::crypto::derive_key;
use lynx_core::DerivedKey;

use crate::cli::Cli;
use crate::config::{load_or_default, LynxConfig};
use crate::helpers::prompt_passphrase;
use crate::ui::{with_spinner, UiContext};

use super::resolver::{resolve_attempts_path, resolve_config_path};

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<LynxConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Loaded config, or defaults when no config file exists.
    pub fn config(&self) -> anyhow::Result<&LynxConfig> {
        self.config
            .get_or_try_init(|| load_or_default(&resolve_config_path()?))
    }

    /// UI context for this invocation.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.cli.ascii)
    }

    /// Prompt for the passphrase and derive the session key.
    ///
    /// Derivation runs once per invocation; the key is reused for every
    /// field the command touches.
    pub fn derive_key(&self, ui: &UiContext) -> anyhow::Result<DerivedKey> {
        let passphrase = prompt_passphrase(ui.is_interactive())?;
        with_spinner(ui, "Deriving key", || derive_key(&passphrase))
            .map_err(crate::errors::from_core)
    }

    /// Token gate backed by the on-disk attempt counter.
    pub fn token_gate(&self) -> anyhow::Result<TokenGate<FileAttemptStore>> {
        let config = self.config()?;
        let store = FileAttemptStore::new(resolve_attempts_path()?);
        Ok(TokenGate::new(config.auth.token_digest.clone(), store)
            .with_max_failed_attempts(config.auth.max_failed_attempts)
            .with_instance(config.auth.instance.clone()))
    }
}
