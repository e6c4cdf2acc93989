use serde::Deserialize;

use super::{FetchError, fetch_json, http_client};
use crate::state::Book;

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<VolumeResponse>>,
}

#[derive(Debug, Deserialize)]
struct VolumeResponse {
    id: String,
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

#[derive(Debug, Deserialize)]
struct VolumeInfo {
    title: String,
    authors: Option<Vec<String>>,
    description: Option<String>,
    categories: Option<Vec<String>>,
    #[serde(rename = "imageLinks")]
    image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
struct ImageLinks {
    thumbnail: Option<String>,
}

fn book_from_volume(volume: VolumeResponse) -> Book {
    let info = volume.volume_info;
    Book {
        id: volume.id,
        title: info.title,
        authors: info.authors,
        description: info.description,
        categories: info.categories,
        thumbnail: info.image_links.and_then(|links| links.thumbnail),
    }
}

/// Search the catalog for `query`, optionally keeping only one category.
pub async fn search_books(
    base_url: &str,
    query: &str,
    category: Option<&str>,
) -> Result<Vec<Book>, FetchError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let url = format!("{base_url}/volumes?q={}", urlencoding::encode(query));
    let client = http_client();
    let data: VolumesResponse = fetch_json(&client, &url).await?;

    let books: Vec<Book> = data
        .items
        .unwrap_or_default()
        .into_iter()
        .map(book_from_volume)
        .filter(|book| match category {
            Some(tag) => book.category_list().iter().any(|category| category == tag),
            None => true,
        })
        .collect();
    log::info!("book search {query:?} returned {} items", books.len());
    Ok(books)
}
