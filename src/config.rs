//! Runtime configuration carried in state so effects stay self-contained

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const POKEAPI_BASE: &str = "https://pokeapi.co/api/v2";
pub const BOOKS_BASE: &str = "https://www.googleapis.com/books/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 151;

/// Base URLs of the two upstream APIs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Endpoints {
    pub pokeapi: String,
    pub books: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            pokeapi: POKEAPI_BASE.to_string(),
            books: BOOKS_BASE.to_string(),
        }
    }
}

impl Endpoints {
    /// Strip trailing slashes so paths can be appended with `/`.
    pub fn normalized(self) -> Self {
        Self {
            pokeapi: self.pokeapi.trim_end_matches('/').to_string(),
            books: self.books.trim_end_matches('/').to_string(),
        }
    }
}

/// How the detail requests of the Pokedex index are issued
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FanOut {
    /// One request at a time, in index order
    #[default]
    Sequential,
    /// Up to N requests in flight; results are re-ordered by index
    Parallel(usize),
}

impl FanOut {
    pub fn from_limit(limit: usize) -> Self {
        if limit <= 1 {
            FanOut::Sequential
        } else {
            FanOut::Parallel(limit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fan_out_from_limit() {
        assert_eq!(FanOut::from_limit(0), FanOut::Sequential);
        assert_eq!(FanOut::from_limit(1), FanOut::Sequential);
        assert_eq!(FanOut::from_limit(8), FanOut::Parallel(8));
    }

    #[test]
    fn test_endpoints_normalized() {
        let endpoints = Endpoints {
            pokeapi: "http://localhost:8080/".into(),
            books: "http://localhost:9090//".into(),
        }
        .normalized();
        assert_eq!(endpoints.pokeapi, "http://localhost:8080");
        assert_eq!(endpoints.books, "http://localhost:9090");
    }
}
