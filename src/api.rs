//! PokeAPI client for the card lookup.

use std::sync::OnceLock;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::state::{CardVariant, PokemonCard, PokemonDetail, PokemonStat};
use crate::weakness::{self, TypeRelations};

const API_BASE: &str = "https://pokeapi.co/api/v2";

/// Lookup error type
#[derive(Debug)]
pub enum LookupError {
    Request(reqwest::Error),
    NotFound(String),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::Request(err) => write!(f, "Lookup request failed: {}", err),
            LookupError::NotFound(query) => write!(f, "No match for: {}", query),
        }
    }
}

impl std::error::Error for LookupError {}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    height: u16,
    weight: u16,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    sprites: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonTypeSlot {
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonStatSlot {
    base_stat: u16,
    stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    damage_relations: DamageRelations,
}

#[derive(Clone, Debug, Deserialize)]
struct DamageRelations {
    double_damage_from: Vec<NamedResource>,
    half_damage_from: Vec<NamedResource>,
    no_damage_from: Vec<NamedResource>,
}

/// Fetch a Pokemon by lowercase name or numeric id.
pub async fn fetch_pokemon(query: &str) -> Result<PokemonDetail, LookupError> {
    let url = format!("{API_BASE}/pokemon/{query}");
    let response: PokemonResponse = fetch_json(&url, query).await?;

    let types = response
        .types
        .into_iter()
        .map(|slot| slot.type_info.name)
        .collect();
    let stats = response
        .stats
        .into_iter()
        .map(|slot| PokemonStat {
            name: slot.stat.name,
            value: slot.base_stat,
        })
        .collect();

    let artwork_url = pointer_string(
        &response.sprites,
        "/other/official-artwork/front_default",
    );
    let sprite_front_shiny = pointer_string(&response.sprites, "/front_shiny");

    Ok(PokemonDetail {
        id: response.id,
        name: response.name,
        types,
        stats,
        height: response.height,
        weight: response.weight,
        artwork_url,
        sprite_front_shiny,
    })
}

/// Fetch the defensive damage relations of one element type.
pub async fn fetch_type_relations(name: &str) -> Result<TypeRelations, LookupError> {
    let url = format!("{API_BASE}/type/{name}");
    let response: TypeDetailResponse = fetch_json(&url, name).await?;
    Ok(TypeRelations {
        name: name.to_string(),
        double_from: names(response.damage_relations.double_damage_from),
        half_from: names(response.damage_relations.half_damage_from),
        no_from: names(response.damage_relations.no_damage_from),
    })
}

/// One full lookup: the Pokemon, then one relations document per type in
/// declared order, folded into the weakness set.
pub async fn fetch_card(query: &str, variant: CardVariant) -> Result<PokemonCard, LookupError> {
    let detail = fetch_pokemon(query).await?;
    let mut relations = Vec::with_capacity(detail.types.len());
    for type_name in &detail.types {
        relations.push(fetch_type_relations(type_name).await?);
    }
    let weaknesses = weakness::weaknesses(&relations);
    Ok(PokemonCard {
        detail,
        weaknesses,
        variant,
    })
}

/// Fetch raw bytes (artwork PNGs).
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, LookupError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(LookupError::Request)?;
    let response = classify_status(response, url)?;
    Ok(response
        .bytes()
        .await
        .map_err(LookupError::Request)?
        .to_vec())
}

fn names(entries: Vec<NamedResource>) -> Vec<String> {
    entries.into_iter().map(|entry| entry.name).collect()
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(
    url: &str,
    query: &str,
) -> Result<T, LookupError> {
    let response = http_client()
        .get(url)
        .send()
        .await
        .map_err(LookupError::Request)?;
    let response = classify_status(response, query)?;
    response.json().await.map_err(LookupError::Request)
}

fn classify_status(
    response: reqwest::Response,
    query: &str,
) -> Result<reqwest::Response, LookupError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Err(LookupError::NotFound(query.to_string()));
    }
    response.error_for_status().map_err(LookupError::Request)
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
