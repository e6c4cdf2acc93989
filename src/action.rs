//! Actions for both screens and the landing menu

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Book, Pokemon, Screen};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    /// Startup: opens the configured screen and runs the initial search
    Init,

    // ===== Screen navigation (ScreenBack is uncategorized) =====
    ScreenOpen(Screen),
    ScreenBack,

    // ===== Landing category =====
    LandingSelect(usize),
    LandingConfirm,

    // ===== Pokedex category =====
    /// Intent: fetch the index page and details (triggers async task)
    PokedexFetch,
    PokedexDidLoad { seq: u64, pokemon: Vec<Pokemon> },
    PokedexDidError { seq: u64, error: String },
    /// Name-prefix text changed; filters the held collection
    PokedexQueryChange(String),

    // ===== Book category =====
    BookQueryChange(String),
    /// Explicit search submission (triggers async task)
    BookQuerySubmit(String),
    /// Explicit search with the selected category applied by the fetcher
    BookSearchInCategory,
    BookDidLoad { seq: u64, books: Vec<Book> },
    BookDidError { seq: u64, error: String },
    BookCategoryNext,
    BookCategoryPrev,

    // ===== Grid category =====
    /// Move the selection by whole rows
    GridMove(i16),
    /// Move the selection by single cards
    GridStep(i16),
    GridPage(i16),

    // ===== UI (UiTerminalResize infers "ui_terminal") =====
    UiTerminalResize(u16, u16),
    /// Force a re-render (for cursor movement, etc.)
    Render,

    // ===== Uncategorized (global) =====
    Tick,
    Quit,
}
