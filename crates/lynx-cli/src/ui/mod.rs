//! UI primitives for the Lynx CLI.
//!
//! - **Context**: environment detection (TTY, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and styles
//! - **Render**: key-value lines, hints, item tables, errors
//! - **Progress**: spinner shown while a key is derived

mod context;
mod mode;
pub mod progress;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use mode::OutputMode;
pub use progress::with_spinner;
pub use render::{badge, hint, item_table, kv, print, print_error};
pub use theme::Badge;
