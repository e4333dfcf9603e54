use lynx_core::crypto::digest;

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{write_config, LynxConfig};
use crate::constants::env_vars;
use crate::errors::CliError;
use crate::helpers::prompt_secret;
use crate::ui::{badge, hint, kv, print, Badge};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let config_path = resolve_config_path()?;

    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists: {}\nHint: Re-run with --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let token = match args.token.clone() {
        Some(token) => Some(zeroize::Zeroizing::new(token)),
        None if ui.is_interactive() || std::env::var_os(env_vars::TOKEN).is_some() => {
            Some(prompt_secret("API token", env_vars::TOKEN, ui.is_interactive())?)
        }
        None => None,
    };

    let mut config = LynxConfig::default();
    if let Some(token) = token.as_ref().filter(|t| !t.is_empty()) {
        config.auth.token_digest = Some(digest(token));
    }
    if let Some(max) = args.max_failed_attempts {
        if max == 0 {
            return Err(CliError::invalid_input("--max-failed-attempts must be at least 1").into());
        }
        config.auth.max_failed_attempts = max;
    }

    write_config(&config_path, &config)?;
    tracing::info!(path = %config_path.display(), "config written");

    if ctx.quiet() {
        return Ok(());
    }
    print(&ui, &badge(&ui, Badge::Ok, "Config written"));
    print(&ui, &kv(&ui, "Path", &config_path.display().to_string()));
    print(
        &ui,
        &kv(
            &ui,
            "Max failed attempts",
            &config.auth.max_failed_attempts.to_string(),
        ),
    );
    if config.auth.token_digest.is_none() {
        print(
            &ui,
            &hint(&ui, "No API token set. Run `lynx init --token <TOKEN> --force` to add one."),
        );
    }
    Ok(())
}
