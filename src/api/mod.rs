//! Remote list fetchers for PokeAPI and Google Books

pub mod books;
pub mod pokeapi;

use serde::de::DeserializeOwned;

pub use books::search_books;
pub use pokeapi::fetch_pokedex;

/// Everything that can go wrong between sending a request and holding a
/// typed response. The UI only ever shows the `Display` text.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request to {url} failed with HTTP {status}")]
    HttpStatus { status: u16, url: String },
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

pub(crate) async fn fetch_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, FetchError> {
    log::debug!("GET {url}");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("GET {url} returned {status}");
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
