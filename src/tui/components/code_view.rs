//! Scrollable, syntax-highlighted code view Component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use tuirealm::{
    Component, Event, MockComponent, State, StateValue,
    command::{Cmd, CmdResult, Direction as CmdDirection},
    event::Key,
    props::{AttrValue, Attribute, Props},
};

use crossterm_actions::{NavigationEvent, SelectionEvent, TuiEvent};

use crate::highlighting::TokenLine;
use crate::theme::Palette;
use crate::tui::msg::Msg;
use crate::tui::{AppAction, dispatcher, handle_global_app_events};

/// Custom user events (none yet, but required by tui-realm).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd)]
pub enum UserEvent {}

/// Convert token lines to ratatui lines using the palette.
pub fn styled_lines<I>(lines: I, palette: &Palette) -> Vec<Line<'static>>
where
    I: IntoIterator<Item = TokenLine>,
{
    lines
        .into_iter()
        .map(|line| {
            let spans: Vec<Span<'static>> = line
                .tokens
                .into_iter()
                .map(|token| Span::styled(token.text, palette.style(token.class)))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Colors for the code view from the theme.
#[derive(Debug, Clone, Copy)]
pub struct CodeViewColors {
    pub background: Color,
    pub gutter_fg: Color,
    pub border: Color,
}

impl From<&Palette> for CodeViewColors {
    fn from(palette: &Palette) -> Self {
        Self {
            background: palette.background.into(),
            gutter_fg: palette.gutter.into(),
            border: palette.border.into(),
        }
    }
}

pub struct CodeView {
    props: Props,
    title: String,
    lines: Vec<Line<'static>>,
    scroll: usize,
    visible_height: usize,
    line_numbers: bool,
    colors: CodeViewColors,
}

impl CodeView {
    pub fn new(colors: CodeViewColors) -> Self {
        Self {
            props: Props::default(),
            title: String::new(),
            lines: Vec::new(),
            scroll: 0,
            visible_height: 20,
            line_numbers: true,
            colors,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn without_line_numbers(mut self) -> Self {
        self.line_numbers = false;
        self
    }

    pub fn set_lines(&mut self, lines: Vec<Line<'static>>) {
        self.lines = lines;
        self.scroll = 0;
    }

    /// Scroll so that `line` is the first visible row.
    pub fn scroll_to(&mut self, line: usize) {
        self.scroll = line.min(self.lines.len().saturating_sub(1));
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        let max_scroll = self.lines.len().saturating_sub(self.visible_height);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }
}

impl MockComponent for CodeView {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let bg_style = Style::default().bg(self.colors.background);
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(bg_style.fg(self.colors.border))
            .style(bg_style);
        if !self.title.is_empty() {
            block = block.title(format!(" {} ", self.title));
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.visible_height = inner.height as usize;

        let gutter_style = Style::default()
            .fg(self.colors.gutter_fg)
            .bg(self.colors.background);
        let visible_lines: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .map(|(i, line)| {
                if !self.line_numbers {
                    return line.clone();
                }
                let mut spans = vec![Span::styled(format!("{:4} ", i + 1), gutter_style)];
                spans.extend(line.spans.iter().cloned());
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(visible_lines).style(bg_style), inner);

        if self.lines.len() > inner.height as usize {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
            let mut scrollbar_state = ScrollbarState::new(self.lines.len()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
        }
    }

    fn query(&self, attr: Attribute) -> Option<AttrValue> {
        self.props.get(attr)
    }

    fn attr(&mut self, attr: Attribute, value: AttrValue) {
        self.props.set(attr, value);
    }

    fn state(&self) -> State {
        State::One(StateValue::Usize(self.scroll))
    }

    fn perform(&mut self, cmd: Cmd) -> CmdResult {
        match cmd {
            Cmd::Scroll(CmdDirection::Up) => {
                self.scroll_up();
                CmdResult::Changed(self.state())
            }
            Cmd::Scroll(CmdDirection::Down) => {
                self.scroll_down();
                CmdResult::Changed(self.state())
            }
            _ => CmdResult::None,
        }
    }
}

impl Component<Msg, UserEvent> for CodeView {
    fn on(&mut self, ev: Event<UserEvent>) -> Option<Msg> {
        let Event::Keyboard(key_event) = ev else {
            return None;
        };

        // Esc is not mapped in the dispatcher
        if key_event.code == Key::Esc {
            return Some(Msg::Back);
        }

        let action = dispatcher().dispatch(&key_event)?;

        if let Some(msg) = handle_global_app_events(&action) {
            return Some(msg);
        }

        match action {
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)) => {
                self.perform(Cmd::Scroll(CmdDirection::Up));
                Some(Msg::ScrollUp)
            }
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)) => {
                self.perform(Cmd::Scroll(CmdDirection::Down));
                Some(Msg::ScrollDown)
            }

            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next))
            | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)) => Some(Msg::NextTab),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev))
            | AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)) => Some(Msg::PrevTab),

            AppAction::SelectTab(idx) => Some(Msg::SelectTab(usize::from(idx))),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::{Token, TokenClass};

    #[test]
    fn test_styled_lines_keep_text_and_colors() {
        let palette = Palette::default();
        let lines = styled_lines(
            vec![TokenLine {
                tokens: vec![
                    Token::new("const", TokenClass::Keyword),
                    Token::new(" x", TokenClass::Plain),
                ],
            }],
            &palette,
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans.len(), 2);
        assert_eq!(lines[0].spans[0].content, "const");
        assert_eq!(
            lines[0].spans[0].style.fg,
            Some(palette.color(TokenClass::Keyword).into())
        );
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut view = CodeView::new(CodeViewColors::from(&Palette::default()));
        view.set_lines(vec![Line::from("a"), Line::from("b"), Line::from("c")]);
        view.visible_height = 2;

        view.perform(Cmd::Scroll(CmdDirection::Up));
        assert_eq!(view.state(), State::One(StateValue::Usize(0)));

        for _ in 0..5 {
            view.perform(Cmd::Scroll(CmdDirection::Down));
        }
        assert_eq!(view.state(), State::One(StateValue::Usize(1)));

        view.scroll_to(100);
        assert_eq!(view.state(), State::One(StateValue::Usize(2)));
    }
}
