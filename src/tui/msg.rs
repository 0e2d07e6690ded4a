//! Application messages for the TUI.

/// Messages emitted by components and handled by the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    // Application control
    Quit,
    Back,
    ShowHelp,
    ToggleView,

    // Tab selection
    NextTab,
    PrevTab,
    SelectTab(usize),

    // Already applied inside the code view
    ScrollUp,
    ScrollDown,
}
