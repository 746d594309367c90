//! Actions - user intent, async results, and the global key stream.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::{CardVariant, PokemonCard};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// First render after startup; the card begins as a placeholder.
    Init,

    // ===== Search category =====
    /// Search input text changed.
    SearchQueryChange(String),

    /// Query submitted; begins the exit transition and schedules the
    /// lookup.
    SearchSubmit(String),

    // ===== Lookup category =====
    /// The exit-transition delay elapsed; blank the card and start the
    /// fetch (or prompt on empty input).
    LookupStart { input: String },

    // ===== Card category =====
    /// Result: a card (Pokemon plus weaknesses) loaded.
    CardDidLoad { card: PokemonCard },

    /// Result: the lookup failed (not found or transport error).
    CardDidError {
        variant: CardVariant,
        query: String,
        error: String,
    },

    // ===== Sprite category =====
    /// Result: artwork decoded for the displayed card.
    SpriteDidLoad(SpriteData),

    /// Result: artwork fetch or decode failed; the card keeps its
    /// placeholder icon.
    SpriteDidError(String),

    // ===== Uncategorized (global) =====
    /// One canonicalized key name from the global keydown stream; feeds
    /// the easter-egg matcher.
    GlobalKey(String),

    /// Force a re-render (cursor movement, etc.)
    Render,

    /// Periodic tick for the searching animation
    Tick,

    /// Exit the application
    Quit,
}
