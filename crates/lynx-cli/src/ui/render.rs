//! Rendering primitives for CLI output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_MARKDOWN, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};

use lynx_core::{SealedItem, SecretItem};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge with optional message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let colored_badge = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        colored_badge
    } else {
        format!("{} {}", colored_badge, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with dim key
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let styled_key = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", styled_key, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled("Hint:", styles::dim(), ctx.color);
        format!("{} {}", label, text.trim_start_matches("Hint: "))
    } else {
        format!("hint={}", text.trim_start_matches("Hint: "))
    }
}

/// Render opened items.
///
/// Pretty mode: bordered table
/// Plain mode: one tab-separated line per item
pub fn item_table(ctx: &UiContext, items: &[(&SealedItem, SecretItem)]) -> String {
    if !ctx.mode.is_pretty() {
        return items
            .iter()
            .map(|(sealed, item)| {
                format!(
                    "{}\t{}\t{}\t{}",
                    sealed.id,
                    item.description(),
                    item.username().unwrap_or(""),
                    item.password()
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = Table::new();
    if ctx.unicode {
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS);
    } else {
        table.load_preset(ASCII_MARKDOWN);
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header: Vec<Cell> = ["ID", "Date", "Description", "Username", "Password"]
        .into_iter()
        .map(|title| {
            let cell = Cell::new(title);
            if ctx.color {
                cell.add_attribute(Attribute::Bold)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header);

    for (sealed, item) in items {
        table.add_row(vec![
            short_id(&sealed.id),
            sealed.date.format("%Y-%m-%d %H:%M").to_string(),
            item.description().to_string(),
            item.username().unwrap_or("-").to_string(),
            item.password().to_string(),
        ]);
    }

    table.to_string()
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Print to stdout unless in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Format an error message with optional hint.
///
/// Pretty mode: "[ERR] message" with optional "Hint: ..." on next line
/// Plain mode: "error=message" with optional "hint=suggestion"
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();

    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
    } else {
        lines.push(format!("error={}", message));
    }
    if let Some(h) = error_hint {
        lines.push(hint(ctx, h));
    }

    lines.join("\n")
}

/// Print an error message to stderr with optional hint.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::OutputMode;
    use lynx_core::crypto::{derive_key, Passphrase};

    fn plain_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
            mode: OutputMode::Plain,
        }
    }

    fn pretty_ctx() -> UiContext {
        UiContext {
            color: false,
            unicode: true,
            mode: OutputMode::Pretty,
        }
    }

    #[test]
    fn test_badge_ok() {
        let b = badge(&plain_ctx(), Badge::Ok, "Done");
        assert_eq!(b, "[OK] Done");
    }

    #[test]
    fn test_kv_modes() {
        assert_eq!(kv(&plain_ctx(), "Max Attempts", "20"), "max_attempts=20");
        assert_eq!(kv(&pretty_ctx(), "Instance", "default"), "Instance: default");
    }

    #[test]
    fn test_hint_strips_prefix() {
        assert_eq!(hint(&plain_ctx(), "Hint: run lynx init"), "hint=run lynx init");
        assert_eq!(hint(&pretty_ctx(), "run lynx init"), "Hint: run lynx init");
    }

    #[test]
    fn test_error_message_plain() {
        let msg = error_message(&plain_ctx(), "Failed to decrypt.", None);
        assert_eq!(msg, "error=Failed to decrypt.");
    }

    #[test]
    fn test_item_table_modes() {
        let key = derive_key(&Passphrase::from("render")).unwrap();
        let sealed = SecretItem::new("github", Some("octocat".to_string()), "hunter2")
            .seal(&key)
            .unwrap();
        let items = vec![(&sealed, sealed.open(&key).unwrap())];

        let plain = item_table(&plain_ctx(), &items);
        assert_eq!(
            plain,
            format!("{}\tgithub\toctocat\thunter2", sealed.id)
        );

        let pretty = item_table(&pretty_ctx(), &items);
        assert!(pretty.contains("Description"));
        assert!(pretty.contains("octocat"));
        assert!(pretty.contains(&sealed.id.to_string()[..8]));
    }
}
