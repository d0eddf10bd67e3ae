//! Catalog browsing flow tests: dispatch actions against the reducer and
//! assert on the derived view state, no network involved.

use pokedex::action::Action;
use pokedex::effect::Effect;
use pokedex::reducer::reduce;
use pokedex::state::{AppState, PokemonSummary, SortKey};

fn summary(name: &str, id: u16, weight: u32) -> PokemonSummary {
    PokemonSummary {
        name: name.to_string(),
        id,
        weight,
    }
}

/// A slice of the real catalog, deliberately out of id order.
fn fixture_catalog() -> Vec<PokemonSummary> {
    vec![
        summary("charizard", 6, 905),
        summary("bulbasaur", 1, 69),
        summary("charmeleon", 5, 190),
        summary("mr-mime", 122, 545),
        summary("charmander", 4, 85),
        summary("pidgey", 16, 18),
        summary("magikarp", 129, 100),
    ]
}

fn loaded_state() -> AppState {
    let mut state = AppState::default();
    reduce(&mut state, Action::CatalogFetch);
    reduce(&mut state, Action::CatalogDidLoad(fixture_catalog()));
    state
}

#[test]
fn load_then_search_char_sorted_by_id() {
    let mut state = loaded_state();

    reduce(&mut state, Action::QuerySet("char".to_string()));
    reduce(&mut state, Action::SortSet(SortKey::IdAsc));

    let names: Vec<&str> = state
        .visible
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["charmander", "charmeleon", "charizard"]);
    let ids: Vec<u16> = state.visible.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn search_survives_a_later_sort_change() {
    let mut state = loaded_state();

    reduce(&mut state, Action::SortSet(SortKey::NameAsc));
    reduce(&mut state, Action::QuerySet("ma".to_string()));
    reduce(&mut state, Action::SortSet(SortKey::WeightAsc));

    // Both inputs apply regardless of which changed last.
    let names: Vec<&str> = state
        .visible
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["charmander", "magikarp"]);
}

#[test]
fn reveal_cursor_survives_filter_shrink_without_reset() {
    let mut state = loaded_state();
    state.revealed = 0;
    reduce(&mut state, Action::RevealMore(20));
    assert_eq!(state.revealed, 7, "clamped to the full catalog");

    reduce(&mut state, Action::QuerySet("char".to_string()));

    // The cursor is not reset on a query change; the rendered slice clamps.
    assert_eq!(state.revealed, 7);
    assert_eq!(state.visible_slice().len(), 3);

    reduce(&mut state, Action::QuerySet(String::new()));
    assert_eq!(state.visible_slice().len(), 7);
}

#[test]
fn failed_load_leaves_empty_catalog_and_a_message() {
    let mut state = AppState::default();
    reduce(&mut state, Action::CatalogFetch);
    assert!(state.catalog_loading);

    reduce(
        &mut state,
        Action::CatalogDidError("request failed: dns error".to_string()),
    );

    assert!(!state.catalog_loading);
    assert!(state.all.is_empty());
    assert!(state.visible_slice().is_empty());
    assert!(state.message.is_some());
}

#[test]
fn selecting_an_entry_emits_a_detail_load() {
    let mut state = loaded_state();

    let effects = reduce(
        &mut state,
        Action::DetailFetch {
            name: "mr-mime".to_string(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::LoadDetail {
            name: "mr-mime".to_string()
        }]
    );
    assert!(state.detail_loading);
    assert_eq!(state.detail, None);
}
