//! Effects - side effects declared by the reducer

use crate::state::CardVariant;

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Wait out the card's exit transition, then deliver `LookupStart`.
    ScheduleLookup { input: String },
    /// Fetch a Pokemon by name or id, derive its weaknesses, and deliver
    /// the finished card.
    FetchCard { query: String, variant: CardVariant },
    /// Fetch and decode artwork for the displayed card.
    LoadSprite { url: String },
}
