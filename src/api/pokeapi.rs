use std::collections::HashSet;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::{FetchError, fetch_json, http_client};
use crate::config::FanOut;
use crate::state::{Pokemon, TypeTag};

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    weight: u32,
    sprites: SpritesResponse,
    types: Vec<PokemonTypeSlot>,
}

#[derive(Clone, Debug, Deserialize)]
struct SpritesResponse {
    front_default: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    slot: u8,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

impl From<PokemonResponse> for Pokemon {
    fn from(response: PokemonResponse) -> Self {
        let mut types: Vec<TypeTag> = response
            .types
            .into_iter()
            .map(|slot| TypeTag {
                slot: slot.slot,
                name: slot.type_info.name,
            })
            .collect();
        types.sort_by_key(|tag| tag.slot);
        Pokemon {
            id: response.id,
            name: response.name,
            weight: response.weight,
            sprite: response.sprites.front_default,
            types,
        }
    }
}

/// Fetch the first index page, then every entry's detail record.
///
/// The result is in index order regardless of `fan_out`; a failed detail
/// request fails the whole fetch.
pub async fn fetch_pokedex(
    base_url: &str,
    page_size: u32,
    fan_out: FanOut,
) -> Result<Vec<Pokemon>, FetchError> {
    let client = http_client();
    let url = format!("{base_url}/pokemon?limit={}", page_size.max(1));
    let index: ListResponse = fetch_json(&client, &url).await?;
    let urls: Vec<String> = index.results.into_iter().map(|entry| entry.url).collect();
    log::info!("pokedex index listed {} entries", urls.len());

    let details = match fan_out {
        FanOut::Sequential => fetch_sequential(&client, &urls).await?,
        FanOut::Parallel(limit) => fetch_parallel(&client, &urls, limit).await?,
    };
    Ok(dedup_by_id(details))
}

async fn fetch_sequential(
    client: &reqwest::Client,
    urls: &[String],
) -> Result<Vec<Pokemon>, FetchError> {
    let mut pokemon = Vec::with_capacity(urls.len());
    for url in urls {
        let detail: PokemonResponse = fetch_json(client, url).await?;
        pokemon.push(detail.into());
    }
    Ok(pokemon)
}

async fn fetch_parallel(
    client: &reqwest::Client,
    urls: &[String],
    limit: usize,
) -> Result<Vec<Pokemon>, FetchError> {
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut join_set = JoinSet::new();
    for (index, url) in urls.iter().cloned().enumerate() {
        let client = client.clone();
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| FetchError::Network("detail semaphore closed".to_string()))?;
            let detail: PokemonResponse = fetch_json(&client, &url).await?;
            Ok::<_, FetchError>((index, Pokemon::from(detail)))
        });
    }

    let mut slots: Vec<Option<Pokemon>> = vec![None; urls.len()];
    while let Some(joined) = join_set.join_next().await {
        let (index, pokemon) =
            joined.map_err(|err| FetchError::Network(format!("detail task failed: {err}")))??;
        slots[index] = Some(pokemon);
    }
    Ok(slots.into_iter().flatten().collect())
}

fn dedup_by_id(pokemon: Vec<Pokemon>) -> Vec<Pokemon> {
    let mut seen = HashSet::new();
    pokemon
        .into_iter()
        .filter(|entry| seen.insert(entry.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_types_sorted_by_slot() {
        let response: PokemonResponse = serde_json::from_str(
            r#"{
                "id": 6,
                "name": "charizard",
                "weight": 905,
                "sprites": { "front_default": null },
                "types": [
                    { "slot": 2, "type": { "name": "flying", "url": "t/3" } },
                    { "slot": 1, "type": { "name": "fire", "url": "t/10" } }
                ]
            }"#,
        )
        .unwrap();

        let pokemon = Pokemon::from(response);

        assert_eq!(pokemon.type_names().collect::<Vec<_>>(), vec!["fire", "flying"]);
        assert_eq!(pokemon.sprite, None);
        assert_eq!(pokemon.weight_kg(), 90.5);
    }

    #[test]
    fn test_dedup_keeps_first() {
        let make = |id, name: &str| Pokemon {
            id,
            name: name.into(),
            weight: 1,
            sprite: None,
            types: Vec::new(),
        };
        let result = dedup_by_id(vec![make(1, "a"), make(2, "b"), make(1, "c")]);
        let names: Vec<_> = result.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
