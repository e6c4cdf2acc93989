//! Store and harness flows: fetch lifecycles, filtering and key routing

use dexfinder::{
    action::Action,
    components::{BookView, BookViewProps, Component, PokedexView, PokedexViewProps},
    effect::Effect,
    reducer::reducer,
    state::{AppState, Book, LoadStatus, Pokemon, Screen, TypeTag},
};
use pretty_assertions::assert_eq;
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId, assert_emitted, assert_not_emitted};

fn pokemon(id: u32, name: &str, types: &[&str]) -> Pokemon {
    Pokemon {
        id,
        name: name.into(),
        weight: 10 * id,
        sprite: None,
        types: types
            .iter()
            .enumerate()
            .map(|(idx, name)| TypeTag {
                slot: idx as u8 + 1,
                name: name.to_string(),
            })
            .collect(),
    }
}

fn starters() -> Vec<Pokemon> {
    vec![
        pokemon(1, "bulbasaur", &["grass", "poison"]),
        pokemon(4, "charmander", &["fire"]),
        pokemon(6, "charizard", &["fire", "flying"]),
        pokemon(7, "squirtle", &["water"]),
    ]
}

fn book(title: &str, categories: Option<&[&str]>) -> Book {
    Book {
        id: title.to_lowercase(),
        title: title.into(),
        authors: None,
        description: None,
        categories: categories.map(|tags| tags.iter().map(|tag| tag.to_string()).collect()),
        thumbnail: None,
    }
}

fn pokedex_state() -> AppState {
    AppState {
        screen: Screen::Pokedex,
        ..Default::default()
    }
}

fn names(items: &[Pokemon]) -> Vec<&str> {
    items.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_open_pokedex_fetches_once() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    let result = store.dispatch(Action::ScreenOpen(Screen::Pokedex));
    assert!(result.changed);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::FetchPokedex { seq: 1, .. }));
    assert!(store.state().pokedex.view.loading());

    store.dispatch(Action::PokedexDidLoad {
        seq: 1,
        pokemon: starters(),
    });
    store.dispatch(Action::ScreenBack);
    let result = store.dispatch(Action::ScreenOpen(Screen::Pokedex));
    assert!(result.effects.is_empty());
    assert_eq!(store.state().pokedex.view.status, LoadStatus::Ready);
}

#[test]
fn test_char_prefix_scenario() {
    let mut harness = EffectStoreTestHarness::new(pokedex_state(), reducer);

    harness.dispatch_collect(Action::PokedexFetch);
    harness.drain_effects().effects_count(1);
    harness.complete_action(Action::PokedexDidLoad {
        seq: 1,
        pokemon: starters(),
    });
    harness.process_emitted();

    harness.dispatch_collect(Action::PokedexQueryChange("char".into()));
    harness.drain_effects().effects_empty();

    harness.assert_state(|s| names(&s.pokedex.view.filtered) == vec!["charmander", "charizard"]);
    harness.assert_state(|s| s.pokedex.view.full.len() == 4);

    harness.dispatch_collect(Action::PokedexQueryChange("CHAR".into()));
    harness.assert_state(|s| s.pokedex.view.filtered.len() == 2);

    harness.dispatch_collect(Action::PokedexQueryChange(String::new()));
    harness.assert_state(|s| s.pokedex.view.filtered == s.pokedex.view.full);
}

#[test]
fn test_http_error_keeps_previous_collection() {
    let mut harness = EffectStoreTestHarness::new(pokedex_state(), reducer);

    harness.dispatch_collect(Action::PokedexFetch);
    harness.complete_action(Action::PokedexDidLoad {
        seq: 1,
        pokemon: starters(),
    });
    harness.process_emitted();

    harness.dispatch_collect(Action::PokedexFetch);
    harness.assert_state(|s| s.pokedex.view.loading());
    harness.assert_state(|s| s.pokedex.view.full.len() == 4);

    harness.complete_action(Action::PokedexDidError {
        seq: 2,
        error: "request to http://x/pokemon?limit=151 failed with HTTP 500".into(),
    });
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| !s.pokedex.view.loading());
    harness.assert_state(|s| s.pokedex.view.status == LoadStatus::Failed);
    harness.assert_state(|s| s.pokedex.view.full.len() == 4);
    harness.assert_state(|s| {
        s.pokedex
            .view
            .error
            .as_deref()
            .is_some_and(|error| error.contains("HTTP 500"))
    });
}

#[test]
fn test_stale_result_never_overwrites_newer() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    store.dispatch(Action::BookQuerySubmit("dune".into()));
    store.dispatch(Action::BookQuerySubmit("emma".into()));
    assert_eq!(store.state().books.view.issued_seq, 2);

    let newer = store.dispatch(Action::BookDidLoad {
        seq: 2,
        books: vec![book("Emma", None)],
    });
    assert!(newer.changed);

    let older = store.dispatch(Action::BookDidLoad {
        seq: 1,
        books: vec![book("Dune", None), book("Dune Messiah", None)],
    });
    assert!(!older.changed);

    let titles: Vec<_> = store
        .state()
        .books
        .view
        .full
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Emma"]);
    assert_eq!(store.state().books.view.status, LoadStatus::Ready);
}

#[test]
fn test_stale_error_is_discarded() {
    let mut store = EffectStore::new(pokedex_state(), reducer);
    store.dispatch(Action::PokedexFetch);
    store.dispatch(Action::PokedexFetch);
    store.dispatch(Action::PokedexDidLoad {
        seq: 2,
        pokemon: starters(),
    });

    let result = store.dispatch(Action::PokedexDidError {
        seq: 1,
        error: "network error: reset".into(),
    });

    assert!(!result.changed);
    assert_eq!(store.state().pokedex.view.error, None);
    assert_eq!(store.state().pokedex.view.status, LoadStatus::Ready);
}

#[test]
fn test_older_error_does_not_hide_newer_fetch() {
    let mut store = EffectStore::new(pokedex_state(), reducer);
    store.dispatch(Action::PokedexFetch);
    store.dispatch(Action::PokedexFetch);

    store.dispatch(Action::PokedexDidError {
        seq: 1,
        error: "request to http://x/pokemon?limit=151 failed with HTTP 500".into(),
    });

    assert!(store.state().pokedex.view.loading());
    assert_eq!(store.state().pokedex.view.error, None);
}

#[test]
fn test_book_search_effect_and_category_filter() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::BookQueryChange("rust".into()));
    harness.drain_effects().effects_empty();

    harness.dispatch_collect(Action::BookQuerySubmit("rust".into()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| {
        matches!(e, Effect::SearchBooks { query, category: None, .. } if query == "rust")
    });

    harness.complete_action(Action::BookDidLoad {
        seq: 1,
        books: vec![
            book("Free Rust", Some(&["free-ebooks"])),
            book("No Tags", None),
            book("Paid Rust", Some(&["Paid ebooks", "Computers"])),
        ],
    });
    harness.process_emitted();

    // All -> Paid ebooks -> free-ebooks
    harness.dispatch_collect(Action::BookCategoryNext);
    harness.dispatch_collect(Action::BookCategoryNext);
    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.books.category.as_deref() == Some("free-ebooks"));
    harness.assert_state(|s| {
        s.books
            .view
            .filtered
            .iter()
            .map(|b| b.title.as_str())
            .eq(["Free Rust"])
    });

    harness.dispatch_collect(Action::BookSearchInCategory);
    harness.drain_effects().effects_first_matches(|e| {
        matches!(e, Effect::SearchBooks { seq: 2, category: Some(tag), .. } if tag == "free-ebooks")
    });
}

#[test]
fn test_keys_route_through_pokedex_view() {
    let mut harness = EffectStoreTestHarness::new(pokedex_state(), reducer);
    let mut view = PokedexView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("c h", |state, event| {
        let props = PokedexViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    assert_emitted!(actions, Action::PokedexQueryChange(_));
    assert_not_emitted!(actions, Action::PokedexFetch);
}

#[test]
fn test_book_view_typing_never_fetches() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut view = BookView::new();

    let actions = harness.send_keys::<NumericComponentId, _, _>("d u n e", |state, event| {
        let props = BookViewProps {
            state,
            is_focused: true,
        };
        view.handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    for action in actions {
        harness.dispatch_collect(action);
    }

    harness.drain_effects().effects_empty();
    harness.assert_state(|s| s.books.view.status == LoadStatus::Idle);
}

#[test]
fn test_tick_animates_only_while_loading() {
    let mut harness = EffectStoreTestHarness::new(pokedex_state(), reducer);

    let results = harness.dispatch_all([Action::Tick, Action::PokedexFetch, Action::Tick]);
    assert_eq!(results, vec![false, true, true]);
    harness.assert_state(|s| s.tick == 1);
}

#[test]
fn test_action_categories() {
    let did_load = Action::PokedexDidLoad {
        seq: 1,
        pokemon: Vec::new(),
    };
    let resize = Action::UiTerminalResize(80, 24);

    assert_eq!(did_load.category(), Some("pokedex_did"));
    assert!(did_load.is_pokedex_did());
    assert_eq!(resize.category(), Some("ui_terminal"));
    assert!(resize.is_ui_terminal());
    assert_eq!(Action::ScreenBack.category(), None);
    assert_eq!(Action::Tick.category(), None);
}
