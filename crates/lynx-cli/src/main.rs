//! Lynx CLI - zero-knowledge password vault client
//!
//! Command-line front end to the Lynx core: derive a key from the master
//! passphrase, seal and open vault items, and check API tokens.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::Parser;
use lynx_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{auth, crypto, init, items, misc};
use crate::errors::exit_code_for;
use crate::ui::print_error;

fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    init_logging(&log_level(&ctx, &cli));

    if let Err(e) = run(&ctx, &cli) {
        let ui_ctx = ctx.ui_context(false);
        let error_msg = format!("{}", e);
        let (message, hint) = split_hint(&error_msg);

        print_error(&ui_ctx, message, hint);
        std::process::exit(exit_code_for(&e));
    }
}

/// `-v` and `-q` win over the config file; `RUST_LOG` wins over both.
fn log_level(ctx: &AppContext, cli: &Cli) -> String {
    match (cli.quiet, cli.verbose) {
        (true, _) => "error".to_string(),
        (false, 0) => ctx
            .config()
            .map(|config| config.logging.level.clone())
            .unwrap_or_else(|_| "warn".to_string()),
        (false, 1) => "debug".to_string(),
        (false, _) => "trace".to_string(),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Split a trailing "Hint:" line off an error message.
fn split_hint(error: &str) -> (&str, Option<&str>) {
    match error.find("\nHint:") {
        Some(idx) => (&error[..idx], Some(&error[idx + 1..])),
        None => (error, None),
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::Encrypt(args)) => {
            crypto::handle_encrypt(ctx, args)?;
        }
        Some(Commands::Decrypt(args)) => {
            crypto::handle_decrypt(ctx, args)?;
        }
        Some(Commands::Digest(args)) => {
            crypto::handle_digest(args)?;
        }
        Some(Commands::Generate(args)) => {
            crypto::handle_generate(ctx, args)?;
        }
        Some(Commands::Seal(args)) => {
            items::handle_seal(ctx, args)?;
        }
        Some(Commands::Open(args)) => {
            items::handle_open(ctx, args)?;
        }
        Some(Commands::Auth(args)) => {
            auth::handle_auth(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Lynx v{}", VERSION);
            println!("\nQuickstart:");
            println!("  lynx init --token <TOKEN>");
            println!("  echo 'hunter2' | lynx encrypt");
            println!("  lynx seal --description github --username octocat --generate > item.json");
            println!("  lynx open item.json");
            println!("\nRun `lynx --help` for full usage.");
        }
    }

    Ok(())
}
