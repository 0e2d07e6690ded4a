//! Interactive terminal viewer for the snippet catalogs.
//!
//! Architecture: Activity-based with tui-realm for components.
//! Each screen (activity) has its own Application instance; both share one
//! message type and the viewer state carried in [`activity::Context`].

mod activities;
mod activity;
mod components;
mod msg;

use std::io::stdout;
use std::sync::LazyLock;

use color_eyre::eyre::{Result, WrapErr};
use crossterm_actions::{
    ActionBinding, ActionConfig, AppEvent, EditingMode, TuiEvent, TuiRealmDispatcher, defaults,
    keys,
};
use ratatui::{
    Terminal,
    crossterm::ExecutableCommand,
    crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
    prelude::CrosstermBackend,
};
use tracing::info;

use crate::catalog::{CatalogKind, SnippetCatalog};
use crate::config::ShowcaseConfig;
use crate::theme::Palette;
use crate::viewer::ViewerState;

use activity::{ActivityManager, Context};
use msg::Msg;

// ============================================================================
// Event handling (shared across activities)
// ============================================================================

/// Unified application events - wraps TuiEvent + custom actions.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AppAction {
    /// Standard TUI events (navigation, input, selection, app)
    Tui(TuiEvent),
    /// Switch between the showcase and quick-start screens
    ToggleView,
    /// Jump to a tab by its 0-based position
    SelectTab(u8),
}

const TAB_KEYS: [(char, &str); 9] = [
    ('1', "Select tab 1"),
    ('2', "Select tab 2"),
    ('3', "Select tab 3"),
    ('4', "Select tab 4"),
    ('5', "Select tab 5"),
    ('6', "Select tab 6"),
    ('7', "Select tab 7"),
    ('8', "Select tab 8"),
    ('9', "Select tab 9"),
];

/// Global dispatcher instance - shared by all components.
pub static DISPATCHER: LazyLock<TuiRealmDispatcher<AppAction>> = LazyLock::new(|| {
    let mut config = ActionConfig::new(EditingMode::Emacs);

    // Import all standard TuiEvent bindings wrapped in AppAction::Tui
    for binding in defaults::emacs_defaults().bindings() {
        config.bind(ActionBinding {
            action: AppAction::Tui(binding.action),
            keys: binding.keys.clone(),
            description: binding.description.clone(),
        });
    }

    config.bind(
        ActionBinding::builder()
            .action(AppAction::ToggleView)
            .key(keys::char('s'))
            .description("Switch screen")
            .build(),
    );

    for (idx, (key, description)) in TAB_KEYS.iter().enumerate() {
        config.bind(
            ActionBinding::builder()
                .action(AppAction::SelectTab(idx as u8))
                .key(keys::char(*key))
                .description(*description)
                .build(),
        );
    }

    config.compile();
    TuiRealmDispatcher::new(config)
});

/// Convenience function for components to access the dispatcher.
pub fn dispatcher() -> &'static TuiRealmDispatcher<AppAction> {
    &DISPATCHER
}

/// Handle global application events that are common across all components.
/// Returns Some(Msg) if the action was handled, None otherwise.
pub fn handle_global_app_events(action: &AppAction) -> Option<Msg> {
    match action {
        AppAction::Tui(TuiEvent::App(AppEvent::Quit)) => Some(Msg::Quit),
        AppAction::Tui(TuiEvent::App(AppEvent::Help)) => Some(Msg::ShowHelp),
        AppAction::ToggleView => Some(Msg::ToggleView),
        _ => None,
    }
}

// ============================================================================
// TUI entry point
// ============================================================================

/// Run the interactive viewer.
///
/// Catalogs and colours are resolved before the terminal is touched so that
/// configuration errors are reported on a normal screen.
pub fn run(config: &ShowcaseConfig) -> Result<()> {
    let viewer = config
        .viewer
        .build_viewer()
        .wrap_err("Failed to build snippet catalog")?;
    let quick_start = ViewerState::initialize(
        SnippetCatalog::builtin(CatalogKind::QuickStart)?,
        CatalogKind::QuickStart.default_key(),
    )?;
    let palette = Palette::from_config(&config.theme).wrap_err("Invalid theme colours")?;

    info!(
        tabs = viewer.catalog().len(),
        active = viewer.active_key(),
        "starting viewer"
    );

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let context = Context {
        viewer,
        quick_start,
        palette,
    };
    let mut manager = ActivityManager::new(context);

    let result = manager.run(&mut terminal);

    // Cleanup terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}
