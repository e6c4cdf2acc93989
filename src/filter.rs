//! Client-side filtering of fetched collections
//!
//! Everything here is pure: inputs are borrowed, results are fresh vectors
//! and an item missing the filtered-on field is simply a non-match.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Book;

/// Category tags offered by the book selector before any search has run.
pub const PRESET_CATEGORIES: [&str; 2] = ["Paid ebooks", "free-ebooks"];

/// User-supplied predicate input
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FilterCriteria {
    #[default]
    None,
    /// Case-insensitive display-name prefix
    NamePrefix(String),
    /// Exact, case-sensitive category tag
    Category(String),
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        match self {
            FilterCriteria::None => true,
            FilterCriteria::NamePrefix(prefix) => prefix.is_empty(),
            FilterCriteria::Category(tag) => tag.is_empty(),
        }
    }
}

/// Fields the filter can look at. Either may be absent on a given item.
pub trait Filterable {
    fn display_name(&self) -> Option<&str>;
    fn has_category(&self, tag: &str) -> bool;
}

pub fn matches<T: Filterable>(item: &T, criteria: &FilterCriteria) -> bool {
    if criteria.is_empty() {
        return true;
    }
    match criteria {
        FilterCriteria::None => true,
        FilterCriteria::NamePrefix(prefix) => item
            .display_name()
            .map(|name| name.to_lowercase().starts_with(&prefix.to_lowercase()))
            .unwrap_or(false),
        FilterCriteria::Category(tag) => item.has_category(tag),
    }
}

/// Keep the items matching `criteria`, in their original order.
pub fn filter<T: Filterable + Clone>(items: &[T], criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| matches(*item, criteria))
        .cloned()
        .collect()
}

/// Selector entries: presets first, then every fetched category, sorted.
pub fn category_options(books: &[Book]) -> Vec<String> {
    let mut discovered: Vec<String> = books
        .iter()
        .flat_map(|book| book.category_list().iter().cloned())
        .filter(|category| !PRESET_CATEGORIES.contains(&category.as_str()))
        .collect();
    discovered.sort();
    discovered.dedup();

    PRESET_CATEGORIES
        .iter()
        .map(|preset| preset.to_string())
        .chain(discovered)
        .collect()
}
