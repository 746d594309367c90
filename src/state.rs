//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::sprite::SpriteData;

/// Delay between starting the card's exit transition and blanking its
/// content, so the outgoing card is visible before the reset.
pub const EXIT_ANIM_DELAY_MS: u64 = 300;

/// Spinner cadence for the status-message animation while a lookup is in
/// flight.
pub const LOADING_TICK_MS: u64 = 120;

/// Highest dex id the shiny roll can land on.
pub const MAX_POKEMON_ID: u32 = 1025;

/// Key-name sequence that flips the card into shiny mode. Keys are
/// canonicalized to their browser-style names before matching.
pub const KONAMI_CODE: &str =
    "ArrowUpArrowUpArrowDownArrowDownArrowLeftArrowRightArrowLeftArrowRightba";

/// One fetched Pokemon, as the card consumes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonDetail {
    pub id: u16,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Vec<PokemonStat>,
    pub height: u16,
    pub weight: u16,
    pub artwork_url: Option<String>,
    pub sprite_front_shiny: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonStat {
    pub name: String,
    pub value: u16,
}

impl PokemonDetail {
    /// "#025" - zero-padded three-digit dex number.
    pub fn number(&self) -> String {
        format!("#{:03}", self.id)
    }

    /// Decimetres to metres, one decimal: 7 -> "0.7m".
    pub fn height_text(&self) -> String {
        format!("{:.1}m", self.height as f32 / 10.0)
    }

    /// Hectograms to kilograms, one decimal: 690 -> "69.0kg".
    pub fn weight_text(&self) -> String {
        format!("{:.1}kg", self.weight as f32 / 10.0)
    }
}

/// Which artwork a card shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum CardVariant {
    #[default]
    Normal,
    Shiny,
}

impl CardVariant {
    pub fn label(&self) -> &'static str {
        match self {
            CardVariant::Normal => "normal",
            CardVariant::Shiny => "shiny",
        }
    }
}

/// The unit one lookup produces: the fetched Pokemon plus its derived
/// weakness set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonCard {
    pub detail: PokemonDetail,
    pub weaknesses: Vec<String>,
    pub variant: CardVariant,
}

impl PokemonCard {
    /// URL of the artwork this card's variant displays.
    pub fn sprite_url(&self) -> Option<&str> {
        match self.variant {
            CardVariant::Shiny => self.detail.sprite_front_shiny.as_deref(),
            CardVariant::Normal => self.detail.artwork_url.as_deref(),
        }
    }
}

/// Easter-egg session state: the keystroke window, the active flag, and
/// the id to restore when shiny mode is dismissed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ShinyMode {
    pub active: bool,
    /// Updated only by Normal-variant card loads; dismissing shiny mode
    /// always restores the last genuinely searched Pokemon.
    pub last_pokemon_id: u16,
    buffer: String,
}

impl Default for ShinyMode {
    fn default() -> Self {
        Self {
            active: false,
            last_pokemon_id: 1,
            buffer: String::new(),
        }
    }
}

impl ShinyMode {
    /// Feed one canonical key name into the sliding window. Returns true
    /// when the window's suffix equals the target sequence; the window is
    /// cleared on a match so the sequence cannot re-fire from stale keys.
    pub fn observe(&mut self, key: &str) -> bool {
        self.buffer.push_str(key);
        if self.buffer.len() > KONAMI_CODE.len() {
            let cut = self.buffer.len() - KONAMI_CODE.len();
            let cut = (cut..=self.buffer.len())
                .find(|&i| self.buffer.is_char_boundary(i))
                .unwrap_or(0);
            self.buffer = self.buffer.split_off(cut);
        }
        if self.buffer.ends_with(KONAMI_CODE) {
            self.buffer.clear();
            true
        } else {
            false
        }
    }

    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Card lifecycle: Empty (placeholder) -> Loading -> Loaded/Failed
    #[debug(section = "Card", label = "Card", debug_fmt)]
    pub card: DataResource<PokemonCard>,

    /// Exit transition in progress: the outgoing card renders dimmed
    /// until the scheduled reset lands.
    #[debug(section = "Card", label = "Exiting")]
    pub card_exiting: bool,

    /// Status-message region; None hides it.
    #[debug(section = "Card", label = "Message", debug_fmt)]
    pub message: Option<String>,

    /// Current text in the search input.
    #[debug(section = "Search", label = "Query", debug_fmt)]
    pub search_query: String,

    /// Easter-egg session state.
    #[debug(section = "Shiny", label = "Mode", debug_fmt)]
    pub shiny: ShinyMode,

    /// Decoded artwork for the displayed card, once its fetch lands.
    #[debug(skip)]
    pub sprite: Option<SpriteData>,

    #[debug(skip)]
    pub rng_seed: u64,

    /// Spinner frame counter, advanced only while a lookup is in flight.
    #[debug(skip)]
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            card: DataResource::Empty,
            card_exiting: false,
            message: None,
            search_query: String::new(),
            shiny: ShinyMode::default(),
            sprite: None,
            rng_seed: seed_from_time(),
            tick: 0,
        }
    }
}

impl AppState {
    /// Wipe the card back to its data-free placeholder.
    pub fn reset_card(&mut self) {
        self.card = DataResource::Empty;
        self.sprite = None;
    }

    pub fn loading(&self) -> bool {
        self.card.is_loading()
    }
}

fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() << 32) ^ now.subsec_nanos() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    const KONAMI_KEYS: [&str; 10] = [
        "ArrowUp",
        "ArrowUp",
        "ArrowDown",
        "ArrowDown",
        "ArrowLeft",
        "ArrowRight",
        "ArrowLeft",
        "ArrowRight",
        "b",
        "a",
    ];

    #[test]
    fn exact_sequence_matches_once() {
        let mut shiny = ShinyMode::default();
        let mut matches = 0;
        for key in KONAMI_KEYS {
            if shiny.observe(key) {
                matches += 1;
            }
        }
        assert_eq!(matches, 1);
    }

    #[test]
    fn stray_key_in_the_middle_blocks_the_match() {
        let mut shiny = ShinyMode::default();
        for key in &KONAMI_KEYS[..5] {
            assert!(!shiny.observe(key));
        }
        assert!(!shiny.observe("x"));
        for key in &KONAMI_KEYS[5..] {
            assert!(!shiny.observe(key));
        }
    }

    #[test]
    fn sequence_matches_after_leading_noise() {
        let mut shiny = ShinyMode::default();
        for key in ["p", "i", "k", "a", "Enter", "ArrowLeft"] {
            assert!(!shiny.observe(key));
        }
        let mut matches = 0;
        for key in KONAMI_KEYS {
            if shiny.observe(key) {
                matches += 1;
            }
        }
        assert_eq!(matches, 1);
    }

    #[test]
    fn window_clears_on_match() {
        let mut shiny = ShinyMode::default();
        for key in KONAMI_KEYS {
            shiny.observe(key);
        }
        // A lone trailing "a" must not re-fire against the stale window.
        assert!(!shiny.observe("a"));
    }

    #[test]
    fn multibyte_keys_do_not_break_the_window() {
        let mut shiny = ShinyMode::default();
        for _ in 0..40 {
            assert!(!shiny.observe("é"));
        }
        let mut matches = 0;
        for key in KONAMI_KEYS {
            if shiny.observe(key) {
                matches += 1;
            }
        }
        assert_eq!(matches, 1);
    }

    #[test]
    fn number_is_zero_padded() {
        let detail = PokemonDetail {
            id: 25,
            ..Default::default()
        };
        assert_eq!(detail.number(), "#025");
    }

    #[test]
    fn height_and_weight_formatting() {
        let detail = PokemonDetail {
            height: 7,
            weight: 690,
            ..Default::default()
        };
        assert_eq!(detail.height_text(), "0.7m");
        assert_eq!(detail.weight_text(), "69.0kg");
    }

    #[test]
    fn shiny_card_picks_shiny_sprite() {
        let card = PokemonCard {
            detail: PokemonDetail {
                artwork_url: Some("art".into()),
                sprite_front_shiny: Some("shiny".into()),
                ..Default::default()
            },
            weaknesses: Vec::new(),
            variant: CardVariant::Shiny,
        };
        assert_eq!(card.sprite_url(), Some("shiny"));
        let normal = PokemonCard {
            variant: CardVariant::Normal,
            ..card
        };
        assert_eq!(normal.sprite_url(), Some("art"));
    }
}
