//! Type color palette and stat display names.

use ratatui::style::Color;

/// Neutral tones for the placeholder card and page chrome.
pub const PAGE_BG: Color = Color::Rgb(240, 240, 240);
pub const PANEL_NEUTRAL: Color = Color::Rgb(204, 204, 204);
pub const BADGE_FALLBACK: Color = Color::Rgb(102, 102, 102);

/// Shiny-mode override: fixed dark page plus a gold glow on the card.
pub const SHINY_PAGE_BG: Color = Color::Rgb(85, 85, 85);
pub const SHINY_GLOW: Color = Color::Rgb(255, 255, 0);

pub const TEXT_DARK: Color = Color::Rgb(32, 32, 32);

/// Display color for an element type tag. Unknown tags get the fallback
/// gray so a weakness badge can always be drawn.
pub fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(168, 167, 122),
        "fire" => Color::Rgb(238, 129, 48),
        "water" => Color::Rgb(99, 144, 240),
        "electric" => Color::Rgb(247, 208, 44),
        "grass" => Color::Rgb(122, 199, 76),
        "ice" => Color::Rgb(150, 217, 214),
        "fighting" => Color::Rgb(194, 46, 40),
        "poison" => Color::Rgb(163, 62, 161),
        "ground" => Color::Rgb(226, 191, 101),
        "flying" => Color::Rgb(169, 143, 243),
        "psychic" => Color::Rgb(249, 85, 135),
        "bug" => Color::Rgb(166, 185, 26),
        "rock" => Color::Rgb(182, 161, 54),
        "ghost" => Color::Rgb(115, 87, 151),
        "dragon" => Color::Rgb(111, 53, 252),
        "steel" => Color::Rgb(183, 183, 206),
        "dark" => Color::Rgb(112, 87, 70),
        "fairy" => Color::Rgb(214, 133, 173),
        _ => BADGE_FALLBACK,
    }
}

/// Localized label for an API stat identifier. Unknown identifiers fall
/// back to a capitalized form of the raw name.
pub fn stat_label(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "Attack".to_string(),
        "defense" => "Defense".to_string(),
        "special-attack" => "Sp. Atk".to_string(),
        "special-defense" => "Sp. Def".to_string(),
        "speed" => "Speed".to_string(),
        other => capitalize(other),
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Linear blend between two colors, `t` in [0, 1].
pub fn blend(a: Color, b: Color, t: f32) -> Color {
    let (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) = (a, b) else {
        return a;
    };
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::Rgb(mix(ar, br), mix(ag, bg), mix(ab, bb))
}

/// Page-level tint behind a displayed card: the type color mixed toward
/// the neutral page tone at 0xAA opacity.
pub fn page_tint(primary: Color) -> Color {
    blend(PAGE_BG, primary, 170.0 / 255.0)
}

/// Contrast foreground for a badge background, picked by luminance.
pub fn badge_text(bg: Color) -> Color {
    let Color::Rgb(r, g, b) = bg else {
        return Color::White;
    };
    let lum = 0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32;
    if lum > 160.0 {
        Color::Black
    } else {
        Color::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_distinct_colors() {
        assert_eq!(type_color("fire"), Color::Rgb(238, 129, 48));
        assert_eq!(type_color("water"), Color::Rgb(99, 144, 240));
        assert_ne!(type_color("grass"), BADGE_FALLBACK);
    }

    #[test]
    fn unknown_type_falls_back_to_gray() {
        assert_eq!(type_color("stellar"), BADGE_FALLBACK);
        assert_eq!(type_color(""), BADGE_FALLBACK);
    }

    #[test]
    fn stat_labels() {
        assert_eq!(stat_label("hp"), "HP");
        assert_eq!(stat_label("special-attack"), "Sp. Atk");
        assert_eq!(stat_label("evasion"), "Evasion");
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("pikachu"), "Pikachu");
        assert_eq!(capitalize("mr-mime"), "Mr-mime");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn blend_endpoints() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(100, 50, 25));
    }
}
