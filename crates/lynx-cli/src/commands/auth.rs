use zeroize::Zeroizing;

use lynx_core::auth::AttemptStore;
use lynx_core::AuthDecision;

use crate::app::AppContext;
use crate::cli::AuthArgs;
use crate::constants::env_vars;
use crate::errors::{from_core, CliError};
use crate::helpers::prompt_secret;
use crate::ui::{badge, kv, print, Badge};

pub fn handle_auth(ctx: &AppContext, args: &AuthArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let gate = ctx.token_gate()?;

    if args.reset {
        gate.store().reset(gate.instance()).map_err(from_core)?;
        tracing::info!(instance = gate.instance(), "failed-attempt counter reset");
        if !ctx.quiet() {
            print(&ui, &badge(&ui, Badge::Ok, "Failed-attempt counter cleared"));
            print(&ui, &kv(&ui, "Instance", gate.instance()));
        }
        return Ok(());
    }

    let token = match args.token.clone() {
        Some(token) => Zeroizing::new(token),
        None => prompt_secret("API token", env_vars::TOKEN, ui.is_interactive())?,
    };

    match gate.check_token(&token).map_err(from_core)? {
        AuthDecision::Authorized => {
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Ok, "Token accepted"));
            }
            Ok(())
        }
        AuthDecision::Unauthorized => {
            let failures = gate
                .store()
                .failed_attempts(gate.instance())
                .map_err(from_core)?;
            Err(CliError::auth_failed(format!(
                "Token rejected ({} failed attempts)",
                failures
            ))
            .into())
        }
        AuthDecision::Locked => Err(CliError::auth_failed_with_hint(
            "Too many failed attempts; access is locked",
            "Hint: Run `lynx auth --reset` once the token has been verified.",
        )
        .into()),
        AuthDecision::Misconfigured => Err(CliError::auth_failed_with_hint(
            "No API token digest is configured",
            "Hint: Run `lynx init --token <TOKEN> --force`.",
        )
        .into()),
    }
}
