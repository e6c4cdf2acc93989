//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, Completion, LoadStatus, Screen};

/// Rows taken by everything on a screen except the card grid.
pub const POKEDEX_CHROME_ROWS: u16 = 8;
pub const BOOKS_CHROME_ROWS: u16 = 9;
pub const POKEMON_CARD_HEIGHT: u16 = 5;
pub const BOOK_CARD_HEIGHT: u16 = 7;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let mut effects = Vec::new();
            if let Some(effect) = mount_screen(state) {
                effects.push(effect);
            }
            if let Some(query) = state.initial_query.take() {
                state.books.query = query.clone();
                effects.push(start_book_search(state, query, None));
            }
            if effects.is_empty() {
                DispatchResult::changed()
            } else {
                DispatchResult::changed_with_many(effects)
            }
        }

        // ===== Screen actions =====
        Action::ScreenOpen(screen) => open_screen(state, screen),

        Action::ScreenBack => {
            if state.screen == Screen::Landing {
                return DispatchResult::unchanged();
            }
            state.landing_selected = Screen::MENU
                .iter()
                .position(|screen| *screen == state.screen)
                .unwrap_or(0);
            state.screen = Screen::Landing;
            DispatchResult::changed()
        }

        Action::LandingSelect(index) => {
            let bounded = index.min(Screen::MENU.len() - 1);
            if bounded == state.landing_selected {
                return DispatchResult::unchanged();
            }
            state.landing_selected = bounded;
            DispatchResult::changed()
        }

        Action::LandingConfirm => {
            let screen = Screen::MENU[state.landing_selected.min(Screen::MENU.len() - 1)];
            open_screen(state, screen)
        }

        // ===== Pokedex actions =====
        Action::PokedexFetch => DispatchResult::changed_with(start_pokedex_fetch(state)),

        Action::PokedexDidLoad { seq, pokemon } => {
            let criteria = state.pokedex.criteria();
            match state.pokedex.view.complete(seq, pokemon, &criteria) {
                Completion::Stale => {
                    log::debug!("discarding stale pokedex result #{seq}");
                    DispatchResult::unchanged()
                }
                Completion::Applied => {
                    clamp_selection(&mut state.pokedex.selected, state.pokedex.view.filtered.len());
                    DispatchResult::changed()
                }
            }
        }

        Action::PokedexDidError { seq, error } => match state.pokedex.view.fail(seq, error) {
            Completion::Stale => {
                log::debug!("discarding stale pokedex error #{seq}");
                DispatchResult::unchanged()
            }
            Completion::Applied => DispatchResult::changed(),
        },

        Action::PokedexQueryChange(query) => {
            if state.pokedex.query == query {
                return DispatchResult::unchanged();
            }
            state.pokedex.query = query;
            let criteria = state.pokedex.criteria();
            state.pokedex.view.refilter(&criteria);
            state.pokedex.selected = 0;
            DispatchResult::changed()
        }

        // ===== Book actions =====
        Action::BookQueryChange(query) => {
            if state.books.query == query {
                return DispatchResult::unchanged();
            }
            state.books.query = query;
            DispatchResult::changed()
        }

        Action::BookQuerySubmit(query) => {
            let trimmed = query.trim().to_string();
            state.books.query = query;
            if trimmed.is_empty() {
                return DispatchResult::changed();
            }
            DispatchResult::changed_with(start_book_search(state, trimmed, None))
        }

        Action::BookSearchInCategory => {
            let trimmed = state.books.query.trim().to_string();
            if trimmed.is_empty() {
                return DispatchResult::unchanged();
            }
            let category = state.books.category.clone();
            DispatchResult::changed_with(start_book_search(state, trimmed, category))
        }

        Action::BookDidLoad { seq, books } => {
            let criteria = state.books.criteria();
            match state.books.view.complete(seq, books, &criteria) {
                Completion::Stale => {
                    log::debug!("discarding stale book result #{seq}");
                    DispatchResult::unchanged()
                }
                Completion::Applied => {
                    clamp_selection(&mut state.books.selected, state.books.view.filtered.len());
                    DispatchResult::changed()
                }
            }
        }

        Action::BookDidError { seq, error } => match state.books.view.fail(seq, error) {
            Completion::Stale => {
                log::debug!("discarding stale book error #{seq}");
                DispatchResult::unchanged()
            }
            Completion::Applied => DispatchResult::changed(),
        },

        Action::BookCategoryNext => cycle_category(state, 1),
        Action::BookCategoryPrev => cycle_category(state, -1),

        // ===== Grid actions =====
        Action::GridMove(rows) => {
            let step = rows as i64 * state.grid_columns() as i64;
            move_selection(state, step)
        }

        Action::GridStep(cards) => move_selection(state, cards as i64),

        Action::GridPage(pages) => {
            let (chrome, card_height) = match state.screen {
                Screen::Books => (BOOKS_CHROME_ROWS, BOOK_CARD_HEIGHT),
                _ => (POKEDEX_CHROME_ROWS, POKEMON_CARD_HEIGHT),
            };
            let rows = (state.terminal_size.1.saturating_sub(chrome) / card_height).max(1);
            let step = pages as i64 * rows as i64 * state.grid_columns() as i64;
            move_selection(state, step)
        }

        // ===== UI actions =====
        Action::UiTerminalResize(width, height) => {
            if state.terminal_size == (width, height) {
                return DispatchResult::unchanged();
            }
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.any_loading() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn open_screen(state: &mut AppState, screen: Screen) -> DispatchResult<Effect> {
    if state.screen == screen {
        return DispatchResult::unchanged();
    }
    state.screen = screen;
    match mount_screen(state) {
        Some(effect) => DispatchResult::changed_with(effect),
        None => DispatchResult::changed(),
    }
}

/// The Pokedex fetches once, the first time it is shown.
fn mount_screen(state: &mut AppState) -> Option<Effect> {
    if state.screen == Screen::Pokedex && state.pokedex.view.status == LoadStatus::Idle {
        return Some(start_pokedex_fetch(state));
    }
    None
}

fn start_pokedex_fetch(state: &mut AppState) -> Effect {
    let seq = state.pokedex.view.begin_fetch();
    Effect::FetchPokedex {
        seq,
        base_url: state.endpoints.pokeapi.clone(),
        page_size: state.page_size,
        fan_out: state.fan_out,
    }
}

fn start_book_search(state: &mut AppState, query: String, category: Option<String>) -> Effect {
    let seq = state.books.view.begin_fetch();
    state.books.searched = Some(query.clone());
    Effect::SearchBooks {
        seq,
        base_url: state.endpoints.books.clone(),
        query,
        category,
    }
}

fn cycle_category(state: &mut AppState, step: i16) -> DispatchResult<Effect> {
    let options = state.books.category_options();
    let len = options.len() as i16;
    let current = state
        .books
        .category
        .as_ref()
        .and_then(|name| options.iter().position(|option| option == name))
        .map(|idx| idx as i16 + 1)
        .unwrap_or(0);
    let mut next = current + step;
    if next < 0 {
        next = len;
    } else if next > len {
        next = 0;
    }

    state.books.category = if next == 0 {
        None
    } else {
        Some(options[(next - 1) as usize].clone())
    };
    let criteria = state.books.criteria();
    state.books.view.refilter(&criteria);
    state.books.selected = 0;
    DispatchResult::changed()
}

fn move_selection(state: &mut AppState, step: i64) -> DispatchResult<Effect> {
    let (selected, len) = match state.screen {
        Screen::Pokedex => (&mut state.pokedex.selected, state.pokedex.view.filtered.len()),
        Screen::Books => (&mut state.books.selected, state.books.view.filtered.len()),
        Screen::Landing => return DispatchResult::unchanged(),
    };
    if len == 0 {
        return DispatchResult::unchanged();
    }
    let next = (*selected as i64 + step).clamp(0, len as i64 - 1) as usize;
    if next == *selected {
        return DispatchResult::unchanged();
    }
    *selected = next;
    DispatchResult::changed()
}

fn clamp_selection(selected: &mut usize, len: usize) {
    if *selected >= len {
        *selected = len.saturating_sub(1);
    }
}
