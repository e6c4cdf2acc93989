//! Effects - side effects declared by the reducer

use crate::config::FanOut;

/// Side effects that can be triggered by actions.
///
/// Every fetch carries the sequence number of its attempt so the result
/// can be matched against newer attempts.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch the Pokedex index page and its detail records
    FetchPokedex {
        seq: u64,
        base_url: String,
        page_size: u32,
        fan_out: FanOut,
    },
    /// Search the book catalog
    SearchBooks {
        seq: u64,
        base_url: String,
        query: String,
        category: Option<String>,
    },
}
