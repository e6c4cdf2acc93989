pub mod book_view;
pub mod card_grid;
pub mod landing;
pub mod pokedex_view;
pub mod search_bar;
pub mod status_line;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use book_view::{BookView, BookViewProps};
pub use card_grid::{CardGrid, CardGridProps, GridCard};
pub use landing::{Landing, LandingProps};
pub use pokedex_view::{PokedexView, PokedexViewProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use status_line::status_line;
