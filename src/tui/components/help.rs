//! Key-binding footer and help modal.

use crossterm_actions::{AppEvent, NavigationEvent, SelectionEvent, TuiEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use crate::tui::{AppAction, dispatcher};

/// Actions to display in a keybinding group.
struct KeybindingGroup {
    title: &'static str,
    actions: &'static [AppAction],
}

const HELP_GROUPS: &[KeybindingGroup] = &[
    KeybindingGroup {
        title: "Global",
        actions: &[
            AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
            AppAction::Tui(TuiEvent::App(AppEvent::Help)),
            AppAction::ToggleView,
        ],
    },
    KeybindingGroup {
        title: "Tabs",
        actions: &[
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
            AppAction::Tui(TuiEvent::Selection(SelectionEvent::Prev)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Right)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Left)),
            AppAction::SelectTab(0),
        ],
    },
    KeybindingGroup {
        title: "Scrolling",
        actions: &[
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Up)),
            AppAction::Tui(TuiEvent::Navigation(NavigationEvent::Down)),
        ],
    },
];

/// Actions shown in the footer of both screens.
pub const FOOTER_ACTIONS: &[AppAction] = &[
    AppAction::Tui(TuiEvent::Selection(SelectionEvent::Next)),
    AppAction::ToggleView,
    AppAction::Tui(TuiEvent::App(AppEvent::Help)),
    AppAction::Tui(TuiEvent::App(AppEvent::Quit)),
];

/// Format a footer string from a list of actions.
/// Format: "desc: key | desc: key" (description first, single key binding)
pub fn format_footer(actions: &[AppAction], extras: &[(&str, &str)]) -> String {
    let help_entries = dispatcher().config().help_entries();
    let mut parts: Vec<String> = Vec::new();

    for action in actions {
        if let Some(entry) = help_entries.get(action)
            && let (Some(key), Some(desc)) = (entry.keys.first(), entry.description)
        {
            let short_desc = desc
                .split_whitespace()
                .next()
                .unwrap_or(desc)
                .to_lowercase();
            parts.push(format!("{short_desc}: {key}"));
        }
    }

    for (desc, key) in extras {
        parts.push(format!("{desc}: {key}"));
    }

    parts.join(" | ")
}

/// Help rows for every group, described by the dispatcher's bindings.
fn help_lines() -> Vec<Line<'static>> {
    let help_entries = dispatcher().config().help_entries();
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let keys_style = Style::default().fg(Color::Gray);

    let mut lines = Vec::new();
    for group in HELP_GROUPS {
        lines.push(Line::styled(group.title, heading));
        for action in group.actions {
            let Some(entry) = help_entries.get(action) else {
                continue;
            };
            // The nine digit bindings collapse into one row
            let (desc, keys) = match action {
                AppAction::SelectTab(_) => ("Select tab".to_string(), "1-9".to_string()),
                _ => (
                    entry.description.unwrap_or("(no description)").to_string(),
                    entry
                        .keys
                        .iter()
                        .map(|k| k.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                ),
            };
            lines.push(Line::from(vec![
                Span::raw(format!("  {desc:<20}")),
                Span::styled(keys, keys_style),
            ]));
        }
        lines.push(Line::default());
    }
    lines.push(Line::from(vec![
        Span::raw(format!("  {:<20}", "Back / close")),
        Span::styled("Esc", keys_style),
    ]));
    lines
}

/// Draw the help modal centred over the current screen, sized to its rows.
pub fn render_help(frame: &mut Frame) {
    let lines = help_lines();
    let width = lines.iter().map(Line::width).max().unwrap_or_default() as u16 + 4;
    let height = lines.len() as u16 + 2;

    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(width.max(36))])
        .flex(Flex::Center)
        .areas(area);

    let block = Block::bordered()
        .title(" Keybindings ")
        .title_bottom(
            Line::styled(
                " Esc or Enter closes ",
                Style::default().add_modifier(Modifier::ITALIC),
            )
            .centered(),
        )
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_help_lists_groups_and_collapses_digits() {
        let rows: Vec<String> = help_lines().iter().map(row_text).collect();
        for title in ["Global", "Tabs", "Scrolling"] {
            assert!(rows.iter().any(|r| r == title), "missing {title}");
        }
        assert_eq!(rows.iter().filter(|r| r.contains("Select tab")).count(), 1);
        assert!(rows.iter().any(|r| r.contains("Switch screen")));
    }

    #[test]
    fn test_footer_shows_switch_key() {
        let footer = format_footer(&[AppAction::ToggleView], &[("tab", "1-9")]);
        assert!(footer.starts_with("switch: "));
        assert!(footer.ends_with(" | tab: 1-9"));
    }
}
