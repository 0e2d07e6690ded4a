//! Quick-start activity - every step stacked as a card in one scrollable view.

use std::io::Stdout;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use ratatui::{
    Terminal,
    crossterm::event::{self, Event, KeyCode},
    layout::{Constraint, Layout},
    prelude::CrosstermBackend,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tracing::{debug, error, warn};
use tuirealm::{Application, EventListenerCfg, PollStrategy};

use crate::highlighting::{TokenClass, render};
use crate::theme::Palette;
use crate::tui::activity::{Activity, Context, ExitReason};
use crate::tui::components::{
    CodeView, CodeViewColors, FOOTER_ACTIONS, UserEvent, format_footer, render_help, styled_lines,
};
use crate::tui::msg::Msg;
use crate::viewer::ViewerState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Id {
    Cards,
}

/// Rendered cards plus the row each card starts on.
struct CardLayout {
    lines: Vec<Line<'static>>,
    offsets: Vec<usize>,
}

/// Lay out every step as: numbered title, caption, code, blank separator.
fn layout_cards(viewer: &ViewerState, palette: &Palette) -> CardLayout {
    let title_style = palette
        .style(TokenClass::Function)
        .add_modifier(Modifier::BOLD);
    let caption_style = palette.style(TokenClass::Comment);

    let mut lines = Vec::new();
    let mut offsets = Vec::with_capacity(viewer.catalog().len());

    for (idx, snippet) in viewer.catalog().iter().enumerate() {
        offsets.push(lines.len());

        let marker = if viewer.is_active(&snippet.key) {
            ">"
        } else {
            " "
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {}. {}", idx + 1, snippet.label),
            title_style,
        )));
        if let Some(caption) = &snippet.caption {
            lines.push(Line::from(Span::styled(
                format!("  {caption}"),
                caption_style,
            )));
        }
        for line in styled_lines(render(snippet), palette) {
            let mut spans = vec![Span::raw("    ")];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
        lines.push(Line::default());
    }

    CardLayout { lines, offsets }
}

#[derive(Default)]
pub struct QuickStartActivity {
    app: Option<Application<Id, Msg, UserEvent>>,
    context: Option<Context>,
    exit_reason: Option<ExitReason>,
    show_help: bool,
    needs_clear: bool,
}

impl QuickStartActivity {
    fn create_application() -> Application<Id, Msg, UserEvent> {
        Application::init(
            EventListenerCfg::default()
                .crossterm_input_listener(Duration::from_millis(20), 10)
                .poll_timeout(Duration::from_millis(50)),
        )
    }

    fn cards_view(context: &Context) -> CodeView {
        let cards = layout_cards(&context.quick_start, &context.palette);
        let offset = cards
            .offsets
            .get(context.quick_start.active_index())
            .copied()
            .unwrap_or_default();

        let mut view = CodeView::new(CodeViewColors::from(&context.palette))
            .with_title("Quick start")
            .without_line_numbers();
        view.set_lines(cards.lines);
        view.scroll_to(offset);
        view
    }

    fn remount(&mut self) {
        let (Some(app), Some(context)) = (self.app.as_mut(), self.context.as_ref()) else {
            return;
        };
        let _ = app.umount(&Id::Cards);
        if let Err(e) = app.mount(Id::Cards, Box::new(Self::cards_view(context)), vec![]) {
            error!("Failed to mount quick-start cards: {}", e);
            return;
        }
        let _ = app.active(&Id::Cards);
        self.needs_clear = true;
    }

    fn transition(&mut self, f: impl FnOnce(&ViewerState) -> ViewerState) {
        let Some(context) = self.context.as_mut() else {
            return;
        };
        let next = f(&context.quick_start);
        if next != context.quick_start {
            debug!(step = next.active_key(), "quick-start step selected");
            context.quick_start = next;
            self.remount();
        }
    }

    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Quit => self.exit_reason = Some(ExitReason::Quit),
            Msg::ToggleView | Msg::Back => self.exit_reason = Some(ExitReason::SwitchToShowcase),
            Msg::ShowHelp => self.show_help = true,
            Msg::NextTab => self.transition(ViewerState::select_next),
            Msg::PrevTab => self.transition(ViewerState::select_previous),
            Msg::SelectTab(idx) => self.transition(|steps| {
                steps.select_index(idx).unwrap_or_else(|e| {
                    warn!(error = %e, "ignoring step selection");
                    steps.clone()
                })
            }),
            Msg::ScrollUp | Msg::ScrollDown => {}
        }
    }
}

impl Activity for QuickStartActivity {
    fn on_create(&mut self, context: Context) {
        let mut app = Self::create_application();
        if let Err(e) = app.mount(Id::Cards, Box::new(Self::cards_view(&context)), vec![]) {
            error!("Failed to mount quick-start cards: {}", e);
        }
        let _ = app.active(&Id::Cards);

        self.context = Some(context);
        self.app = Some(app);
        // Previous screen leaves its tab strip behind otherwise
        self.needs_clear = true;
    }

    fn on_draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        if self.needs_clear {
            terminal.clear()?;
            self.needs_clear = false;
        }

        let Some(app) = self.app.as_mut() else {
            return Err(eyre!("quick-start activity drawn before creation"));
        };
        let show_help = self.show_help;

        terminal.draw(|frame| {
            let [title_area, cards_area, status_area] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
            ])
            .areas(frame.area());

            let title = Paragraph::new(" Get started in four steps")
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(title, title_area);

            app.view(&Id::Cards, frame, cards_area);

            let status = format_footer(FOOTER_ACTIONS, &[("step", "1-9"), ("back", "Esc")]);
            let status_widget =
                Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
            frame.render_widget(status_widget, status_area);

            if show_help {
                render_help(frame);
            }
        })?;

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogKind, SnippetCatalog};

    fn quick_start() -> ViewerState {
        let catalog = SnippetCatalog::builtin(CatalogKind::QuickStart).unwrap();
        ViewerState::initialize(catalog, "install").unwrap()
    }

    #[test]
    fn test_card_offsets_follow_card_heights() {
        let steps = quick_start();
        let cards = layout_cards(&steps, &Palette::default());

        assert_eq!(cards.offsets.len(), steps.catalog().len());
        assert_eq!(cards.offsets[0], 0);
        assert!(cards.offsets.windows(2).all(|w| w[0] < w[1]));

        // title + caption + code lines + blank
        let first = steps.catalog().first();
        let code_lines = render(first).lines().count();
        let caption = usize::from(first.caption.is_some());
        assert_eq!(cards.offsets[1], 1 + caption + code_lines + 1);
    }

    #[test]
    fn test_active_card_is_marked() {
        let steps = quick_start().select_index(2).unwrap();
        let cards = layout_cards(&steps, &Palette::default());

        let title_of = |idx: usize| -> String {
            cards.lines[cards.offsets[idx]]
                .spans
                .iter()
                .map(|s| s.content.as_ref())
                .collect()
        };
        assert!(title_of(2).starts_with("> 3."));
        assert!(title_of(0).starts_with("  1."));
    }
}
