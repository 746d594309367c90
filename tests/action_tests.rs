//! Action and state tests using the plain EffectStore.

use pokecard::{
    action::Action,
    effect::Effect,
    reducer::{reducer, PROMPT_MESSAGE},
    state::{AppState, CardVariant, PokemonCard, PokemonDetail, PokemonStat},
};
use tui_dispatch::testing::*;
use tui_dispatch::EffectStore;

fn mock_card(variant: CardVariant) -> PokemonCard {
    PokemonCard {
        detail: PokemonDetail {
            id: 25,
            name: "pikachu".into(),
            types: vec!["electric".into()],
            stats: vec![PokemonStat {
                name: "hp".into(),
                value: 35,
            }],
            height: 4,
            weight: 60,
            artwork_url: Some("http://example/25.png".into()),
            sprite_front_shiny: Some("http://example/25-shiny.png".into()),
        },
        weaknesses: vec!["ground".into()],
        variant,
    }
}

#[test]
fn test_submit_then_lookup_flow() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().card.is_empty());

    let result = store.dispatch(Action::SearchSubmit("Pikachu".into()));
    assert!(result.changed, "State should change");
    assert!(store.state().card_exiting);
    assert_eq!(
        result.effects,
        vec![Effect::ScheduleLookup {
            input: "pikachu".into()
        }]
    );

    let result = store.dispatch(Action::LookupStart {
        input: "pikachu".into(),
    });
    assert!(store.state().card.is_loading());
    assert!(!store.state().card_exiting);
    assert_eq!(
        result.effects,
        vec![Effect::FetchCard {
            query: "pikachu".into(),
            variant: CardVariant::Normal,
        }]
    );

    store.dispatch(Action::CardDidLoad {
        card: mock_card(CardVariant::Normal),
    });
    assert!(store.state().card.is_loaded());
    assert_eq!(store.state().shiny.last_pokemon_id, 25);
}

#[test]
fn test_empty_submit_still_resets_but_never_fetches() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    // A card is on display from an earlier search.
    store.dispatch(Action::CardDidLoad {
        card: mock_card(CardVariant::Normal),
    });

    let result = store.dispatch(Action::SearchSubmit("   ".into()));
    assert_eq!(
        result.effects,
        vec![Effect::ScheduleLookup { input: "".into() }]
    );

    let result = store.dispatch(Action::LookupStart { input: "".into() });
    assert!(result.effects.is_empty(), "empty input must not fetch");
    assert!(store.state().card.is_empty(), "card reset to placeholder");
    assert_eq!(store.state().message.as_deref(), Some(PROMPT_MESSAGE));
}

#[test]
fn test_lookup_error_keeps_the_failed_input_in_the_message() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::LookupStart {
        input: "missingno".into(),
    });
    store.dispatch(Action::CardDidError {
        variant: CardVariant::Normal,
        query: "missingno".into(),
        error: "HTTP 404".into(),
    });

    assert!(store.state().card.is_failed());
    let message = store.state().message.clone().unwrap_or_default();
    assert!(message.contains("missingno"), "got: {message}");
}

#[test]
fn test_action_categories() {
    // Categories are inferred from naming convention
    let did_load = Action::CardDidLoad {
        card: mock_card(CardVariant::Normal),
    };
    let submit = Action::SearchSubmit("25".into());
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("card_did"));
    assert_eq!(submit.category(), Some("search"));
    assert_eq!(tick.category(), None); // Uncategorized

    // Generated predicates for categorized actions
    assert!(did_load.is_card_did());
    assert!(submit.is_search());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::SearchSubmit("25".into()));
    harness.emit(Action::Tick);
    harness.emit(Action::CardDidError {
        variant: CardVariant::Normal,
        query: "25".into(),
        error: "oops".into(),
    });

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_detail_formatting() {
    let detail = PokemonDetail {
        id: 7,
        height: 5,
        weight: 90,
        ..Default::default()
    };
    assert_eq!(detail.number(), "#007");
    assert_eq!(detail.height_text(), "0.5m");
    assert_eq!(detail.weight_text(), "9.0kg");
}

#[test]
fn test_shiny_variant_swaps_the_artwork_url() {
    let normal = mock_card(CardVariant::Normal);
    let shiny = mock_card(CardVariant::Shiny);
    assert_eq!(normal.sprite_url(), Some("http://example/25.png"));
    assert_eq!(shiny.sprite_url(), Some("http://example/25-shiny.png"));
}
