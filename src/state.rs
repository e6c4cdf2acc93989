//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch_debug::debug::{DebugSection, DebugState, ron_string};

use crate::config::{DEFAULT_PAGE_SIZE, Endpoints, FanOut};
use crate::filter::{self, FilterCriteria, Filterable};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available";

/// Spinner timing while a fetch is in flight.
pub const LOADING_TICK_MS: u64 = 90;

/// Narrowest card before the grid drops a column.
pub const CARD_MIN_WIDTH: u16 = 30;
pub const MAX_GRID_COLUMNS: usize = 4;

/// A type tag attached to a Pokemon, ordered by `slot`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TypeTag {
    pub slot: u8,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Hectograms, as reported by the API
    pub weight: u32,
    pub sprite: Option<String>,
    pub types: Vec<TypeTag>,
}

impl Pokemon {
    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|tag| tag.name.as_str())
    }
}

/// A volume from the book catalog. Only `title` is guaranteed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Option<Vec<String>>,
    pub description: Option<String>,
    pub categories: Option<Vec<String>>,
    pub thumbnail: Option<String>,
}

impl Book {
    pub fn author_line(&self) -> String {
        match self.authors.as_deref() {
            Some(authors) if !authors.is_empty() => authors.join(", "),
            _ => UNKNOWN_AUTHOR.to_string(),
        }
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    pub fn category_list(&self) -> &[String] {
        self.categories.as_deref().unwrap_or(&[])
    }
}

impl Filterable for Pokemon {
    fn display_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn has_category(&self, tag: &str) -> bool {
        self.type_names().any(|name| name == tag)
    }
}

impl Filterable for Book {
    fn display_name(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn has_category(&self, tag: &str) -> bool {
        self.category_list().iter().any(|category| category == tag)
    }
}

/// Fetch lifecycle of one screen: Idle → Loading → Ready/Failed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// What a completed fetch did to the view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Fetched collection, its filtered subsequence and fetch status.
///
/// Each fetch attempt gets a sequence number from `begin_fetch`. A completion
/// is accepted only if no newer attempt has completed first, so a slow old
/// response never overwrites fresher data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewState<T> {
    pub full: Vec<T>,
    pub filtered: Vec<T>,
    pub status: LoadStatus,
    pub error: Option<String>,
    pub issued_seq: u64,
    pub completed_seq: u64,
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self {
            full: Vec::new(),
            filtered: Vec::new(),
            status: LoadStatus::Idle,
            error: None,
            issued_seq: 0,
            completed_seq: 0,
        }
    }
}

impl<T: Filterable + Clone> ViewState<T> {
    pub fn loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Start a new attempt. The current collection stays on screen.
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued_seq += 1;
        self.status = LoadStatus::Loading;
        self.error = None;
        self.issued_seq
    }

    pub fn is_stale(&self, seq: u64) -> bool {
        seq <= self.completed_seq || seq > self.issued_seq
    }

    pub fn complete(&mut self, seq: u64, items: Vec<T>, criteria: &FilterCriteria) -> Completion {
        if self.is_stale(seq) {
            return Completion::Stale;
        }
        self.completed_seq = seq;
        self.full = items;
        self.error = None;
        if seq == self.issued_seq {
            self.status = LoadStatus::Ready;
        }
        self.refilter(criteria);
        Completion::Applied
    }

    /// Record a failure. `full` and `filtered` are left untouched, and the
    /// error is only kept when no newer attempt is still in flight.
    pub fn fail(&mut self, seq: u64, error: String) -> Completion {
        if self.is_stale(seq) {
            return Completion::Stale;
        }
        self.completed_seq = seq;
        if seq == self.issued_seq {
            self.error = Some(error);
            self.status = LoadStatus::Failed;
        } else {
            log::debug!("attempt #{seq} failed while #{} is in flight: {error}", self.issued_seq);
        }
        Completion::Applied
    }

    pub fn refilter(&mut self, criteria: &FilterCriteria) {
        self.filtered = filter::filter(&self.full, criteria);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Screen {
    #[default]
    Landing,
    Pokedex,
    Books,
}

impl Screen {
    pub const MENU: [Screen; 2] = [Screen::Pokedex, Screen::Books];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Landing => "Choose Your Path",
            Screen::Pokedex => "Pokemon",
            Screen::Books => "Bookfinder",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PokedexState {
    pub view: ViewState<Pokemon>,
    pub query: String,
    pub selected: usize,
}

impl PokedexState {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::NamePrefix(self.query.clone())
    }

    pub fn selected_pokemon(&self) -> Option<&Pokemon> {
        self.view.filtered.get(self.selected)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BookshelfState {
    pub view: ViewState<Book>,
    pub query: String,
    /// Client-side category filter; `None` shows every fetched book
    pub category: Option<String>,
    /// Query of the last submitted search
    pub searched: Option<String>,
    pub selected: usize,
}

impl BookshelfState {
    pub fn criteria(&self) -> FilterCriteria {
        match &self.category {
            Some(category) => FilterCriteria::Category(category.clone()),
            None => FilterCriteria::None,
        }
    }

    pub fn category_options(&self) -> Vec<String> {
        filter::category_options(&self.view.full)
    }

    pub fn selected_book(&self) -> Option<&Book> {
        self.view.filtered.get(self.selected)
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    pub screen: Screen,
    pub landing_selected: usize,
    pub terminal_size: (u16, u16),
    pub endpoints: Endpoints,
    pub page_size: u32,
    pub fan_out: FanOut,
    /// Book search to run on startup
    pub initial_query: Option<String>,
    pub pokedex: PokedexState,
    pub books: BookshelfState,
    pub tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Landing,
            landing_selected: 0,
            terminal_size: (80, 24),
            endpoints: Endpoints::default(),
            page_size: DEFAULT_PAGE_SIZE,
            fan_out: FanOut::Sequential,
            initial_query: None,
            pokedex: PokedexState::default(),
            books: BookshelfState::default(),
            tick: 0,
        }
    }
}

impl AppState {
    pub fn new(screen: Screen, endpoints: Endpoints, page_size: u32, fan_out: FanOut) -> Self {
        Self {
            screen,
            endpoints: endpoints.normalized(),
            page_size: page_size.max(1),
            fan_out,
            ..Default::default()
        }
    }

    pub fn with_initial_query(mut self, query: Option<String>) -> Self {
        self.initial_query = query.filter(|query| !query.trim().is_empty());
        self
    }

    pub fn grid_columns(&self) -> usize {
        grid_columns(self.terminal_size.0)
    }

    pub fn any_loading(&self) -> bool {
        self.pokedex.view.loading() || self.books.view.loading()
    }
}

/// Columns of the card grid for a given width: 1 to `MAX_GRID_COLUMNS`.
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_MIN_WIDTH) as usize).clamp(1, MAX_GRID_COLUMNS)
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("App")
                .entry("screen", ron_string(&self.screen))
                .entry("terminal", ron_string(&self.terminal_size))
                .entry("page_size", ron_string(&self.page_size))
                .entry("fan_out", ron_string(&self.fan_out)),
            DebugSection::new("Pokedex")
                .entry("status", ron_string(&self.pokedex.view.status))
                .entry("full", ron_string(&self.pokedex.view.full.len()))
                .entry("filtered", ron_string(&self.pokedex.view.filtered.len()))
                .entry("query", ron_string(&self.pokedex.query))
                .entry("selected", ron_string(&self.pokedex.selected))
                .entry("seq", ron_string(&(self.pokedex.view.issued_seq, self.pokedex.view.completed_seq)))
                .entry("error", ron_string(&self.pokedex.view.error)),
            DebugSection::new("Books")
                .entry("status", ron_string(&self.books.view.status))
                .entry("full", ron_string(&self.books.view.full.len()))
                .entry("filtered", ron_string(&self.books.view.filtered.len()))
                .entry("query", ron_string(&self.books.query))
                .entry("searched", ron_string(&self.books.searched))
                .entry("category", ron_string(&self.books.category))
                .entry("seq", ron_string(&(self.books.view.issued_seq, self.books.view.completed_seq)))
                .entry("error", ron_string(&self.books.view.error)),
        ]
    }
}
