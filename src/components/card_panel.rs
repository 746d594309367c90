//! The card itself: artwork, physical stats, badges, stat bars, and the
//! type-colored backgrounds.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::{AppState, PokemonCard, PokemonStat};
use crate::theme;

pub const MAX_STAT_VALUE: u16 = 255;
pub const NO_WEAKNESS_TEXT: &str = "No notable weaknesses (damage x1 or less).";

const CARD_FACE: Color = Color::Rgb(248, 248, 248);

const POKEBALL: [&str; 6] = [
    "   .----.   ",
    "  / .--. \\  ",
    " | |    | | ",
    " |--(  )--| ",
    "  \\ '--' /  ",
    "   '----'   ",
];

/// Background style of the card's left panel: flat color for one type, a
/// diagonal two-stop blend for two or more, neutral gray for the
/// placeholder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PanelBackground {
    Neutral,
    Flat(Color),
    Gradient(Color, Color),
}

impl PanelBackground {
    pub fn from_types(types: &[String]) -> Self {
        let colors: Vec<Color> = types.iter().map(|name| theme::type_color(name)).collect();
        match colors.as_slice() {
            [] => PanelBackground::Neutral,
            [single] => PanelBackground::Flat(*single),
            [first, second, ..] => PanelBackground::Gradient(*first, *second),
        }
    }

    /// Color at position `t` in [0, 1] along the gradient axis.
    pub fn color_at(&self, t: f32) -> Color {
        match self {
            PanelBackground::Neutral => theme::PANEL_NEUTRAL,
            PanelBackground::Flat(color) => *color,
            PanelBackground::Gradient(first, second) => theme::blend(*first, *second, t),
        }
    }

    /// First stop; drives the page-level tint.
    pub fn primary(&self) -> Option<Color> {
        match self {
            PanelBackground::Neutral => None,
            PanelBackground::Flat(color) => Some(*color),
            PanelBackground::Gradient(first, _) => Some(*first),
        }
    }
}

/// Fraction of a stat bar that is filled, clamped so out-of-range values
/// cannot overflow the bar: 255 -> 1.0, 300 -> 1.0.
pub fn stat_ratio(value: u16) -> f32 {
    (value as f32 / MAX_STAT_VALUE as f32).min(1.0)
}

pub struct CardPanelProps<'a> {
    pub state: &'a AppState,
}

/// Stateless view of the current card.
#[derive(Default)]
pub struct CardPanel;

impl CardPanel {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, props: CardPanelProps<'_>) {
        if area.width < 24 || area.height < 10 {
            return;
        }
        let state = props.state;
        let card = state.card.data();
        let shiny_active = state.shiny.active && matches!(card, Some(c) if c.variant == crate::state::CardVariant::Shiny);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(CARD_FACE).fg(theme::TEXT_DARK));
        if shiny_active {
            block = block
                .border_type(BorderType::Double)
                .border_style(
                    Style::default()
                        .fg(theme::SHINY_GLOW)
                        .add_modifier(Modifier::BOLD),
                )
                .title(" SHINY ")
                .title_alignment(Alignment::Center);
        }
        if state.card_exiting {
            block = block.style(
                Style::default()
                    .bg(CARD_FACE)
                    .fg(theme::TEXT_DARK)
                    .add_modifier(Modifier::DIM),
            );
        }
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::horizontal([Constraint::Percentage(48), Constraint::Percentage(52)])
            .split(inner);

        match card {
            Some(card) => {
                let background = PanelBackground::from_types(&card.detail.types);
                self.render_identity(frame, columns[0], state, card, &background);
                self.render_stats(frame, columns[1], &card.detail.stats, &background);
            }
            None => {
                self.render_placeholder_identity(frame, columns[0]);
                self.render_stats(frame, columns[1], &[], &PanelBackground::Neutral);
            }
        }
    }

    fn render_identity(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        card: &PokemonCard,
        background: &PanelBackground,
    ) {
        fill_background(frame, area, background);

        let rows = identity_rows(area);
        let detail = &card.detail;

        frame.render_widget(
            Paragraph::new(theme::capitalize(&detail.name))
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new(detail.number()).alignment(Alignment::Center),
            rows[1],
        );

        self.render_sprite(frame, rows[2], state);

        frame.render_widget(
            Paragraph::new(format!(
                "Height: {}   Weight: {}",
                detail.height_text(),
                detail.weight_text()
            ))
            .alignment(Alignment::Center),
            rows[3],
        );

        let types = badge_line(detail.types.iter().map(String::as_str));
        frame.render_widget(
            Paragraph::new(Text::from(vec![section_line("Type"), types]))
                .wrap(Wrap { trim: true }),
            rows[4],
        );

        let weak = if card.weaknesses.is_empty() {
            Line::from(NO_WEAKNESS_TEXT)
        } else {
            badge_line(card.weaknesses.iter().map(String::as_str))
        };
        frame.render_widget(
            Paragraph::new(Text::from(vec![section_line("Weak against"), weak]))
                .wrap(Wrap { trim: true }),
            rows[5],
        );
    }

    fn render_placeholder_identity(&self, frame: &mut Frame, area: Rect) {
        fill_background(frame, area, &PanelBackground::Neutral);

        let rows = identity_rows(area);
        frame.render_widget(
            Paragraph::new("???")
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD)),
            rows[0],
        );
        frame.render_widget(
            Paragraph::new("#???").alignment(Alignment::Center),
            rows[1],
        );

        let icon: Vec<Line> = POKEBALL.iter().map(|row| Line::from(*row)).collect();
        frame.render_widget(
            Paragraph::new(Text::from(icon)).alignment(Alignment::Center),
            rows[2],
        );

        frame.render_widget(
            Paragraph::new("Height: --m   Weight: --kg").alignment(Alignment::Center),
            rows[3],
        );

        frame.render_widget(
            Paragraph::new(Text::from(vec![section_line("Type"), unknown_badge()]))
                .wrap(Wrap { trim: true }),
            rows[4],
        );
        frame.render_widget(
            Paragraph::new(Text::from(vec![
                section_line("Weak against"),
                unknown_badge(),
            ]))
            .wrap(Wrap { trim: true }),
            rows[5],
        );
    }

    fn render_sprite(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let Some(sprite) = state.sprite.as_ref() else {
            let text = if state.loading() {
                ""
            } else {
                "[loading artwork]"
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::DIM)),
                area,
            );
            return;
        };

        let cols = area.width.saturating_sub(2).min(sprite.width as u16 * 2);
        let rows = area.height;
        let grid = sprite.cell_rows(cols, rows);
        let lines: Vec<Line> = grid
            .into_iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .into_iter()
                    .map(|cell| match cell {
                        Some((r, g, b)) => {
                            Span::styled(" ", Style::default().bg(Color::Rgb(r, g, b)))
                        }
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
            area,
        );
    }

    fn render_stats(
        &self,
        frame: &mut Frame,
        area: Rect,
        stats: &[PokemonStat],
        background: &PanelBackground,
    ) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .title("STATS")
            .style(Style::default().fg(theme::TEXT_DARK));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Placeholder card: the stat list is cleared entirely.
        if stats.is_empty() {
            return;
        }

        let bar_width = inner.width.saturating_sub(16).max(4) as usize;
        let lines: Vec<Line> = stats
            .iter()
            .map(|stat| stat_line(stat, bar_width, background))
            .collect();
        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }
}

fn identity_rows(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::vertical([
        Constraint::Length(1), // name
        Constraint::Length(1), // number
        Constraint::Min(6),    // artwork
        Constraint::Length(1), // height/weight
        Constraint::Length(2), // type badges
        Constraint::Length(4), // weakness badges
    ])
    .split(area)
}

/// Paint the panel area with its background style; gradients run along
/// the diagonal.
fn fill_background(frame: &mut Frame, area: Rect, background: &PanelBackground) {
    let width = area.width.max(1) as f32;
    let height = area.height.max(1) as f32;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in 0..area.height {
        let spans: Vec<Span> = (0..area.width)
            .map(|x| {
                let t = (x as f32 / width + y as f32 / height) / 2.0;
                Span::styled(" ", Style::default().bg(background.color_at(t)))
            })
            .collect();
        lines.push(Line::from(spans));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn section_line(label: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("{label}:"),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn badge_line<'a>(names: impl Iterator<Item = &'a str>) -> Line<'static> {
    let mut spans = Vec::new();
    for name in names {
        let bg = theme::type_color(name);
        spans.push(Span::styled(
            format!(" {} ", theme::capitalize(name)),
            Style::default().bg(bg).fg(theme::badge_text(bg)),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn unknown_badge() -> Line<'static> {
    Line::from(Span::styled(
        " ??? ",
        Style::default()
            .bg(theme::BADGE_FALLBACK)
            .fg(Color::White),
    ))
}

fn stat_line(stat: &PokemonStat, bar_width: usize, background: &PanelBackground) -> Line<'static> {
    let filled = (stat_ratio(stat.value) * bar_width as f32).round() as usize;
    let mut spans = vec![Span::raw(format!(
        "{:>7} {:>3}/{} ",
        theme::stat_label(&stat.name),
        stat.value.min(999),
        MAX_STAT_VALUE
    ))];
    for i in 0..bar_width {
        let style = if i < filled {
            let t = if bar_width > 1 {
                i as f32 / (bar_width - 1) as f32
            } else {
                0.0
            };
            Style::default().bg(background.color_at(t))
        } else {
            Style::default().bg(theme::PANEL_NEUTRAL)
        };
        spans.push(Span::styled(" ", style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_type_gives_a_flat_background() {
        let background = PanelBackground::from_types(&["electric".to_string()]);
        assert_eq!(background, PanelBackground::Flat(theme::type_color("electric")));
        assert_eq!(background.color_at(0.0), background.color_at(1.0));
    }

    #[test]
    fn two_types_give_a_gradient_in_declared_order() {
        let background =
            PanelBackground::from_types(&["grass".to_string(), "poison".to_string()]);
        assert_eq!(
            background,
            PanelBackground::Gradient(theme::type_color("grass"), theme::type_color("poison"))
        );
        assert_eq!(background.color_at(0.0), theme::type_color("grass"));
        assert_eq!(background.color_at(1.0), theme::type_color("poison"));
        assert_eq!(background.primary(), Some(theme::type_color("grass")));
    }

    #[test]
    fn no_types_give_the_neutral_background() {
        let background = PanelBackground::from_types(&[]);
        assert_eq!(background, PanelBackground::Neutral);
        assert_eq!(background.primary(), None);
    }

    #[test]
    fn stat_ratio_clamps_out_of_range_values() {
        assert_eq!(stat_ratio(255), 1.0);
        assert_eq!(stat_ratio(300), 1.0);
        assert!((stat_ratio(51) - 0.2).abs() < 1e-6);
        assert_eq!(stat_ratio(0), 0.0);
    }
}
