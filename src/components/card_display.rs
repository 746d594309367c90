//! Top-level screen: page chrome, search row, status message, card, and
//! key handling for the global stream.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Paragraph},
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::card_panel::{CardPanel, CardPanelProps, PanelBackground};
use super::{Component, SearchBar, SearchBarProps};
use crate::action::Action;
use crate::state::{AppState, CardVariant};
use crate::theme;

pub struct CardDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The whole lookup screen.
#[derive(Default)]
pub struct CardDisplay {
    search: SearchBar,
}

impl CardDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for CardDisplay {
    type Props<'a> = CardDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let mut actions = Vec::new();
        if !props.is_focused {
            return actions;
        }

        let EventKind::Key(key) = event else {
            return actions;
        };

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            actions.push(Action::Quit);
            return actions;
        }

        // Every keystroke feeds the global stream, like the page-level
        // keydown listener; the reducer runs the easter-egg matcher.
        if let Some(name) = global_key_name(key.code) {
            actions.push(Action::GlobalKey(name));
        }

        // Escape belongs to the easter egg alone.
        if key.code != KeyCode::Esc {
            let input_props = SearchBarProps {
                query: &props.state.search_query,
                is_focused: true,
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchSubmit,
            };
            actions.extend(self.search.handle_event(event, input_props));
        }
        actions
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let page_bg = page_background(state);
        frame.render_widget(
            Block::default().style(Style::default().bg(page_bg)),
            area,
        );

        let chunks = Layout::vertical([
            Constraint::Length(3), // search input
            Constraint::Length(1), // status message
            Constraint::Min(10),   // card
            Constraint::Length(1), // help bar
        ])
        .split(area);

        self.search.render(
            frame,
            chunks[0],
            SearchBarProps {
                query: &state.search_query,
                is_focused: props.is_focused,
                on_change: Action::SearchQueryChange,
                on_submit: Action::SearchSubmit,
            },
        );

        if let Some(message) = status_message(state) {
            frame.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(
                        Style::default()
                            .fg(theme::badge_text(page_bg))
                            .add_modifier(Modifier::BOLD),
                    ),
                chunks[1],
            );
        }

        let mut panel = CardPanel;
        panel.render(frame, chunks[2], CardPanelProps { state });

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[3],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "lookup"),
                    StatusBarHint::new("ctrl+c", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

/// Page-level background: fixed dark in shiny mode, the primary type's
/// tint for a displayed card, neutral otherwise.
fn page_background(state: &AppState) -> ratatui::style::Color {
    let card = state.card.data();
    if state.shiny.active && matches!(card, Some(c) if c.variant == CardVariant::Shiny) {
        return theme::SHINY_PAGE_BG;
    }
    card.and_then(|card| PanelBackground::from_types(&card.detail.types).primary())
        .map(theme::page_tint)
        .unwrap_or(theme::PAGE_BG)
}

fn status_message(state: &AppState) -> Option<String> {
    if let Some(message) = &state.message {
        return Some(message.clone());
    }
    if state.loading() {
        let dots = 1 + (state.tick % 3) as usize;
        return Some(format!("Searching{}", ".".repeat(dots)));
    }
    None
}

/// Browser-style key name for the global stream; keys without a name are
/// not observed.
fn global_key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("ArrowUp".to_string()),
        KeyCode::Down => Some("ArrowDown".to_string()),
        KeyCode::Left => Some("ArrowLeft".to_string()),
        KeyCode::Right => Some("ArrowRight".to_string()),
        KeyCode::Esc => Some("Escape".to_string()),
        KeyCode::Enter => Some("Enter".to_string()),
        KeyCode::Backspace => Some("Backspace".to_string()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn press(component: &mut CardDisplay, state: &AppState, code: KeyCode) -> Vec<Action> {
        component
            .handle_event(
                &EventKind::Key(KeyEvent::new(code, KeyModifiers::NONE)),
                CardDisplayProps {
                    state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect()
    }

    #[test]
    fn arrow_keys_feed_the_global_stream() {
        let mut component = CardDisplay::new();
        let state = AppState::default();
        let actions = press(&mut component, &state, KeyCode::Up);
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::GlobalKey(name) if name == "ArrowUp")));
    }

    #[test]
    fn characters_feed_both_the_stream_and_the_input() {
        let mut component = CardDisplay::new();
        let state = AppState::default();
        let actions = press(&mut component, &state, KeyCode::Char('b'));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::GlobalKey(name) if name == "b")));
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::SearchQueryChange(_))));
    }

    #[test]
    fn ctrl_c_quits_without_feeding_the_stream() {
        let mut component = CardDisplay::new();
        let state = AppState::default();
        let actions: Vec<Action> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
                CardDisplayProps {
                    state: &state,
                    is_focused: true,
                },
            )
            .into_iter()
            .collect();
        assert_eq!(actions, vec![Action::Quit]);
    }

    #[test]
    fn escape_reaches_the_stream_but_not_the_input() {
        let mut component = CardDisplay::new();
        let state = AppState::default();
        let actions = press(&mut component, &state, KeyCode::Esc);
        assert!(actions
            .iter()
            .any(|a| matches!(a, Action::GlobalKey(name) if name == "Escape")));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, Action::SearchQueryChange(_))));
    }

    #[test]
    fn unfocused_display_ignores_keys() {
        let mut component = CardDisplay::new();
        let state = AppState::default();
        let actions: Vec<Action> = component
            .handle_event(
                &EventKind::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
                CardDisplayProps {
                    state: &state,
                    is_focused: false,
                },
            )
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }
}
