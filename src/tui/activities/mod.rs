//! Activity modules for the TUI.

pub mod quick_start;
pub mod showcase;

pub use quick_start::QuickStartActivity;
pub use showcase::ShowcaseActivity;
