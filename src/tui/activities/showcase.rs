//! Showcase activity - one tab per snippet, the active one highlighted.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Frame, Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout, Rect},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, error, warn};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::highlighting::TokenClass;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    CodeView, CodeViewColors, FOOTER_ACTIONS, UserEvent, format_footer, render_help, styled_lines,
};
use crate::tui::msg::Msg;
use crate::viewer::ViewerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    CodeView,
}

#[derive(Default)]
pub struct ShowcaseActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    show_help: bool,
    needs_clear: bool,
}

impl ShowcaseActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    /// Build a code view for the active tab only.
    fn code_view(context: &Context) -> CodeView {
        let snippet = context.viewer.active_snippet();
        let rendering = context.viewer.render_active();
        debug!(
            key = %snippet.key,
            syntax = rendering.syntax_name(),
            "rendering active tab"
        );
        let mut view =
            CodeView::new(CodeViewColors::from(&context.palette)).with_title(snippet.label.clone());
        view.set_lines(styled_lines(rendering, &context.palette));
        view
    }

    /// Remount the code view after the active tab changed.
    fn update_code_view(&mut self) {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref()) else {
            return;
        };
        let _ = app.umount(&Id::CodeView);
        if let Err(e) = app.mount(Id::CodeView, Box::new(Self::code_view(context)), vec![]) {
            error!("Failed to mount code view: {}", e);
            return;
        }
        let _ = app.active(&Id::CodeView);
        self.needs_clear = true;
    }

    /// Apply a selection transition, remounting only when the tab changed.
    fn transition(&mut self, f: impl FnOnce(&ViewerState) -> ViewerState) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        let next = f(&context.viewer);
        if next != context.viewer {
            debug!(
                from = context.viewer.active_key(),
                to = next.active_key(),
                "tab selected"
            );
            context.viewer = next;
            self.update_code_view();
        }
    }

    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Quit => self.exit_reason = Some(ExitReason::Quit),
            Msg::ToggleView => self.exit_reason = Some(ExitReason::SwitchToQuickStart),
            Msg::ShowHelp => self.show_help = true,
            Msg::NextTab => self.transition(ViewerState::select_next),
            Msg::PrevTab => self.transition(ViewerState::select_previous),
            Msg::SelectTab(idx) => self.transition(|viewer| {
                viewer.select_index(idx).unwrap_or_else(|e| {
                    warn!(error = %e, "ignoring tab selection");
                    viewer.clone()
                })
            }),
            // Root screen: nothing to go back to
            Msg::Back => {}
            Msg::ScrollUp | Msg::ScrollDown => {}
        }
    }
}

/// One-line tab strip with the active tab highlighted.
fn draw_tabs(frame: &mut Frame, area: Rect, context: &Context) {
    let active_style = context
        .palette
        .style(TokenClass::Keyword)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED);
    let idle_style = Style::default().add_modifier(Modifier::DIM);

    let mut spans = Vec::new();
    for (idx, snippet) in context.viewer.catalog().iter().enumerate() {
        let style = if idx == context.viewer.active_index() {
            active_style
        } else {
            idle_style
        };
        let label = if idx < 9 {
            format!(" {} {} ", idx + 1, snippet.label)
        } else {
            format!(" {} ", snippet.label)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

impl Activity for ShowcaseActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        if let Err(e) = app.mount(Id::CodeView, Box::new(Self::code_view(&context)), vec![]) {
            error!("Failed to mount code view: {}", e);
        }
        let _ = app.active(&Id::CodeView);

        self.context = Some(context);
        self.app = Some(app);
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        // Force full redraw when switching tabs to prevent ghost text
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }

        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref()) else {
            return Err(eyre!("showcase activity drawn before creation"));
        };
        let show_help = self.show_help;

        terminal.draw(|frame| {
            let [title_area, tabs_area, code_area, status_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            let title = Paragraph::new(" Show me the code - A TodoMVC app in 5 building blocks")
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title, title_area);

            draw_tabs(frame, tabs_area, context);
            app.view(&Id::CodeView, frame, code_area);

            let status = format_footer(FOOTER_ACTIONS, &[("tab", "1-9")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, status_area);

            if show_help {
                render_help(frame);
            }
        })?;

        // Help modal intercepts all input while visible
        if self.show_help {
            if let Event::Key(key) = event::read()?
                && matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?')
                )
            {
                self.show_help = false;
            }
            return Ok(());
        }

        // Timeout is fine, just continue
        if let Ok(messages) = app.tick(PollStrategy::Once) {
            for msg in messages {
                self.handle(msg);
                if self.exit_reason.is_some() {
                    break;
                }
            }
        }

        Ok(())
    }

    fn will_umount(&self) -> Option<&ExitReason> {
        self.exit_reason.as_ref()
    }

    fn on_destroy(&mut self) -> Option<Context> {
        self.app = None;
        self.context.take()
    }
}
