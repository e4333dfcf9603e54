use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use lynx_core::crypto::generate_password;
use lynx_core::{SealedItem, SecretItem};

use crate::app::AppContext;
use crate::cli::{OpenArgs, SealArgs};
use crate::constants::env_vars;
use crate::errors::{from_core, CliError};
use crate::helpers::{prompt_secret, read_json_input};
use crate::ui::{item_table, print};

/// `lynx open` accepts a single record or a list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SealedInput {
    Many(Vec<SealedItem>),
    One(SealedItem),
}

impl SealedInput {
    fn into_vec(self) -> Vec<SealedItem> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// JSON view of an opened item.
#[derive(Serialize)]
struct OpenedItem<'a> {
    id: &'a str,
    date: DateTime<Utc>,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    password: &'a str,
}

pub fn handle_seal(ctx: &AppContext, args: &SealArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);

    let password = if args.generate {
        generate_password(ctx.config()?.generator.length).map_err(from_core)?
    } else if let Some(password) = args.password.clone() {
        Zeroizing::new(password)
    } else {
        prompt_secret("Item password", env_vars::ITEM_PASSWORD, ui.is_interactive())?
    };

    let item = SecretItem::new(
        args.description.clone(),
        args.username.clone(),
        password.as_str(),
    );
    item.validate().map_err(from_core)?;

    let key = ctx.derive_key(&ui)?;
    let sealed = item.seal(&key).map_err(from_core)?;
    tracing::info!(id = %sealed.id, "item sealed");

    println!("{}", serde_json::to_string_pretty(&sealed)?);
    Ok(())
}

pub fn handle_open(ctx: &AppContext, args: &OpenArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(args.json);
    let contents = read_json_input(args.file.as_deref())?;
    let sealed: Vec<SealedItem> = serde_json::from_str::<SealedInput>(&contents)
        .map_err(|e| CliError::invalid_input(format!("Invalid sealed item JSON: {}", e)))?
        .into_vec();

    if sealed.is_empty() {
        if args.json {
            println!("[]");
        } else if !ctx.quiet() {
            print(&ui, "No items.");
        }
        return Ok(());
    }

    let key = ctx.derive_key(&ui)?;
    let mut opened = Vec::with_capacity(sealed.len());
    for item in &sealed {
        opened.push((item, item.open(&key).map_err(from_core)?));
    }
    tracing::debug!(count = opened.len(), "items opened");

    if args.json {
        let view: Vec<OpenedItem> = opened
            .iter()
            .map(|(sealed, item)| OpenedItem {
                id: &sealed.id,
                date: sealed.date,
                description: item.description(),
                username: item.username(),
                password: item.password(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    print(&ui, &item_table(&ui, &opened));
    Ok(())
}
