//! Activity-based architecture for the TUI.
//!
//! Each screen is an Activity with its own Application instance. The
//! ActivityManager orchestrates transitions and hands the shared Context from
//! one activity to the next, so the selected tab survives a screen switch.

use std::io::Stdout;

use color_eyre::eyre::{Result, eyre};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tracing::debug;

use super::activities::{QuickStartActivity, ShowcaseActivity};
use crate::theme::Palette;
use crate::viewer::ViewerState;

/// Shared context passed between activities.
pub struct Context {
    /// Tabbed showcase selection
    pub viewer: ViewerState,
    /// Card selection on the quick-start screen
    pub quick_start: ViewerState,
    pub palette: Palette,
}

/// Exit reasons for activity transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum ExitReason {
    Quit,
    SwitchToShowcase,
    SwitchToQuickStart,
}

/// Activity lifecycle trait.
pub trait Activity {
    /// Initialize the activity with context from the manager.
    fn on_create(&mut self, context: Context);

    /// Draw the UI and handle one tick of events.
    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()>;

    /// Check if activity wants to exit. Returns Some(reason) to exit, None to continue.
    fn will_umount(&self) -> Option<&ExitReason>;

    /// Clean up and return the context to the manager.
    fn on_destroy(&mut self) -> Option<Context>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityType {
    Showcase,
    QuickStart,
}

/// Manages activity lifecycle and transitions.
pub struct ActivityManager {
    context: Option<Context>,
    current: ActivityType,
}

impl ActivityManager {
    pub fn new(context: Context) -> Self {
        Self {
            context: Some(context),
            current: ActivityType::Showcase,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            let mut activity: Box<dyn Activity> = match self.current {
                ActivityType::Showcase => Box::<ShowcaseActivity>::default(),
                ActivityType::QuickStart => Box::<QuickStartActivity>::default(),
            };

            let context = self
                .context
                .take()
                .ok_or_else(|| eyre!("activity context was not returned"))?;
            debug!(activity = ?self.current, "activity created");
            activity.on_create(context);

            loop {
                activity.on_draw(terminal)?;

                let Some(reason) = activity.will_umount() else {
                    continue;
                };
                let next = match reason {
                    ExitReason::Quit => {
                        activity.on_destroy();
                        return Ok(());
                    }
                    ExitReason::SwitchToShowcase => ActivityType::Showcase,
                    ExitReason::SwitchToQuickStart => ActivityType::QuickStart,
                };
                self.context = activity.on_destroy();
                self.current = next;
                break;
            }
        }
    }
}
