//! TUI components using tui-realm.

pub mod code_view;
pub mod help;

pub use code_view::{CodeView, CodeViewColors, UserEvent, styled_lines};
pub use help::{FOOTER_ACTIONS, format_footer, render_help};
