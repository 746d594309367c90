//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, CardVariant, MAX_POKEMON_ID};

pub const PROMPT_MESSAGE: &str = "Please type the name or number of a Pokemon.";
pub const SHINY_ERROR_MESSAGE: &str = "Failed to load Pokemon data.";

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => DispatchResult::changed(),

        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit(query) => {
            let input = query.trim().to_lowercase();
            state.card_exiting = true;
            state.message = None;
            state.tick = 0;
            DispatchResult::changed_with(Effect::ScheduleLookup { input })
        }

        Action::LookupStart { input } => {
            state.card_exiting = false;
            state.reset_card();
            state.tick = 0;
            if input.is_empty() {
                state.message = Some(PROMPT_MESSAGE.to_string());
                return DispatchResult::changed();
            }
            state.message = None;
            state.card = DataResource::Loading;
            DispatchResult::changed_with(Effect::FetchCard {
                query: input,
                variant: CardVariant::Normal,
            })
        }

        // ===== Card actions =====
        Action::CardDidLoad { card } => {
            if card.variant == CardVariant::Normal {
                state.shiny.last_pokemon_id = card.detail.id;
            }
            let sprite_url = card.sprite_url().map(str::to_string);
            state.sprite = None;
            state.card = DataResource::Loaded(card);
            state.card_exiting = false;
            state.message = None;
            match sprite_url {
                Some(url) => DispatchResult::changed_with(Effect::LoadSprite { url }),
                None => DispatchResult::changed(),
            }
        }

        Action::CardDidError {
            variant,
            query,
            error,
        } => {
            state.sprite = None;
            state.card = DataResource::Failed(error);
            state.card_exiting = false;
            state.message = Some(match variant {
                CardVariant::Normal => {
                    format!("Pokemon \"{query}\" not found. Try another name or number.")
                }
                CardVariant::Shiny => SHINY_ERROR_MESSAGE.to_string(),
            });
            DispatchResult::changed()
        }

        // ===== Sprite actions =====
        Action::SpriteDidLoad(sprite) => {
            if state.card.is_loaded() {
                state.sprite = Some(sprite);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        // The card keeps its placeholder icon; the error text is carried
        // in the recorded action for diagnostics.
        Action::SpriteDidError(_) => DispatchResult::unchanged(),

        // ===== Global actions =====
        Action::GlobalKey(key) => {
            if state.shiny.active {
                if key == "Escape" {
                    state.shiny.active = false;
                    state.shiny.clear_buffer();
                    state.message = None;
                    let query = state.shiny.last_pokemon_id.to_string();
                    return DispatchResult::changed_with(Effect::FetchCard {
                        query,
                        variant: CardVariant::Normal,
                    });
                }
                return DispatchResult::unchanged();
            }
            if state.shiny.observe(&key) {
                // The flag flips at request time, whatever the fetch
                // outcome; see the open-question notes in DESIGN.md.
                state.shiny.active = true;
                let id = 1 + next_rand(state) % MAX_POKEMON_ID;
                return DispatchResult::changed_with(Effect::FetchCard {
                    query: id.to_string(),
                    variant: CardVariant::Shiny,
                });
            }
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        Action::Tick => {
            if state.loading() || state.card_exiting {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn next_rand(state: &mut AppState) -> u32 {
    state.rng_seed = state
        .rng_seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1);
    (state.rng_seed >> 32) as u32
}
