//! Tabbed, syntax-highlighted code showcase for the Reflex state-management
//! library.
//!
//! The core is a small immutable [`viewer::ViewerState`] over a fixed
//! [`catalog::SnippetCatalog`]; [`highlighting`] turns the active snippet into
//! classified token lines that [`export`] and the [`tui`] render.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod highlighting;
pub mod logging;
pub mod site;
pub mod theme;
pub mod tui;
pub mod viewer;
