use std::sync::{Arc, OnceLock};

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::state::{
    AbilityInfo, DetailImages, EvolutionStage, PokemonDetail, PokemonSummary, StatValue,
};

const API_BASE: &str = "https://pokeapi.co/api/v2";
/// The index upper bound: everything up to generation 8.
const CATALOG_LIMIT: usize = 905;
const FETCH_CONCURRENCY: usize = 12;
const ABILITY_PLACEHOLDER: &str = "Description not available";
const ARTWORK_BASE: &str = "https://img.pokemondb.net/artwork";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("malformed response from {url}: {message}")]
    Malformed { url: String, message: String },
    #[error("no entry named '{0}'")]
    NotFound(String),
    #[error("fetch task failed: {0}")]
    Task(String),
}

#[derive(Clone, Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct ApiResource {
    url: String,
}

#[derive(Clone, Debug, Deserialize)]
struct IndexResponse {
    results: Vec<NamedResource>,
}

/// The slice of a `/pokemon/{name}` record the catalog needs.
#[derive(Clone, Debug, Deserialize)]
struct SummaryResponse {
    name: String,
    id: u16,
    weight: u32,
}

#[derive(Clone, Debug, Deserialize)]
struct PokemonResponse {
    id: u16,
    name: String,
    types: Vec<PokemonTypeSlot>,
    stats: Vec<PokemonStatSlot>,
    abilities: Vec<PokemonAbilitySlot>,
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
struct PokemonAbilitySlot {
    ability: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct SpeciesResponse {
    flavor_text_entries: Vec<FlavorTextEntry>,
    evolution_chain: Option<ApiResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct FlavorTextEntry {
    flavor_text: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct AbilityResponse {
    effect_entries: Vec<EffectEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct EffectEntry {
    effect: String,
    language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct EvolutionChainResponse {
    chain: ChainLink,
}

#[derive(Clone, Debug, Deserialize)]
struct ChainLink {
    species: NamedResource,
    evolves_to: Vec<ChainLink>,
}

/// Fetches the full index, then resolves every listed entry to a summary.
///
/// A single failed entry fetch aborts the whole load: either the caller gets
/// the complete catalog or an error, never a partial list.
pub async fn fetch_catalog() -> Result<Vec<PokemonSummary>, ApiError> {
    let url = format!("{API_BASE}/pokemon?limit={CATALOG_LIMIT}");
    let index: IndexResponse = fetch_json(&url).await?;
    debug!(entries = index.results.len(), "catalog index loaded");
    fetch_summaries(index.results).await
}

/// Resolves each index entry through a bounded pool, keeping index order.
async fn fetch_summaries(refs: Vec<NamedResource>) -> Result<Vec<PokemonSummary>, ApiError> {
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    let semaphore = Arc::new(Semaphore::new(FETCH_CONCURRENCY));
    let mut join_set = JoinSet::new();
    let total = refs.len();
    for (index, entry) in refs.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|_| ApiError::Task("summary pool closed".to_string()))?;
            let record: SummaryResponse = fetch_json(&entry.url).await?;
            Ok::<_, ApiError>((
                index,
                PokemonSummary {
                    name: record.name,
                    id: record.id,
                    weight: record.weight,
                },
            ))
        });
    }

    // An early return drops the set, aborting whatever is still in flight.
    let mut slots: Vec<Option<PokemonSummary>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        let (index, summary) = joined.map_err(|err| ApiError::Task(err.to_string()))??;
        slots[index] = Some(summary);
    }

    let mut summaries = Vec::with_capacity(total);
    for slot in slots {
        summaries.push(slot.ok_or_else(|| ApiError::Task("summary task vanished".to_string()))?);
    }
    Ok(summaries)
}

/// Aggregates one entity's detail view.
///
/// Only the primary record fetch is terminal. The species description,
/// per-ability effect texts, and the evolution chain each degrade on
/// failure: empty description, a placeholder effect, an empty chain.
pub async fn fetch_pokemon_profile(identifier: &str) -> Result<PokemonDetail, ApiError> {
    let identifier = identifier.to_lowercase();
    let url = format!("{API_BASE}/pokemon/{identifier}");
    let primary: PokemonResponse = match fetch_json(&url).await {
        Err(ApiError::Network(err)) if err.status() == Some(StatusCode::NOT_FOUND) => {
            return Err(ApiError::NotFound(identifier));
        }
        other => other?,
    };

    let species_url = format!("{API_BASE}/pokemon-species/{}", primary.id);
    let species: Option<SpeciesResponse> = match fetch_json(&species_url).await {
        Ok(species) => Some(species),
        Err(err) => {
            warn!(name = %primary.name, %err, "species fetch failed, description degrades");
            None
        }
    };

    let description = species
        .as_ref()
        .and_then(|species| english_flavor_text(&species.flavor_text_entries))
        .unwrap_or_default();

    let ability_refs: Vec<NamedResource> = primary
        .abilities
        .iter()
        .map(|slot| slot.ability.clone())
        .collect();
    let abilities = fetch_ability_effects(ability_refs).await;

    let evolution = match species.as_ref().and_then(|s| s.evolution_chain.as_ref()) {
        Some(chain_ref) => match fetch_json::<EvolutionChainResponse>(&chain_ref.url).await {
            Ok(response) => {
                let mut stages = Vec::new();
                flatten_chain(&response.chain, 0, &mut stages);
                stages
            }
            Err(err) => {
                warn!(name = %primary.name, %err, "evolution chain fetch failed");
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    Ok(PokemonDetail {
        id: primary.id,
        name: primary.name,
        types: primary
            .types
            .into_iter()
            .map(|slot| slot.type_info.name)
            .collect(),
        images: detail_images(&primary.sprites),
        description,
        abilities,
        stats: primary
            .stats
            .into_iter()
            .map(|slot| StatValue {
                name: slot.stat.name,
                value: slot.base_stat,
            })
            .collect(),
        evolution,
    })
}

/// Fetches each ability's effect text through a bounded pool, preserving the
/// primary record's ability order. Failures never propagate; the failed
/// entry gets a placeholder.
async fn fetch_ability_effects(refs: Vec<NamedResource>) -> Vec<AbilityInfo> {
    if refs.is_empty() {
        return Vec::new();
    }

    let semaphore = Arc::new(Semaphore::new(FETCH_CONCURRENCY));
    let mut join_set = JoinSet::new();
    let total = refs.len();
    for (index, entry) in refs.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        join_set.spawn(async move {
            let effect = match semaphore.acquire_owned().await {
                Ok(_permit) => fetch_effect_text(&entry.url).await,
                Err(_) => Err(ApiError::Task("ability pool closed".to_string())),
            };
            (index, ability_info(entry.name, effect))
        });
    }

    let mut slots: Vec<Option<AbilityInfo>> = vec![None; total];
    while let Some(joined) = join_set.join_next().await {
        if let Ok((index, info)) = joined {
            slots[index] = Some(info);
        }
    }
    slots.into_iter().flatten().collect()
}

async fn fetch_effect_text(url: &str) -> Result<String, ApiError> {
    let record: AbilityResponse = fetch_json(url).await?;
    record
        .effect_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.effect))
        .ok_or_else(|| ApiError::Malformed {
            url: url.to_string(),
            message: "no English effect entry".to_string(),
        })
}

fn ability_info(name: String, effect: Result<String, ApiError>) -> AbilityInfo {
    match effect {
        Ok(effect) => AbilityInfo { name, effect },
        Err(err) => {
            warn!(ability = %name, %err, "ability effect fetch failed, using placeholder");
            AbilityInfo {
                name,
                effect: ABILITY_PLACEHOLDER.to_string(),
            }
        }
    }
}

fn english_flavor_text(entries: &[FlavorTextEntry]) -> Option<String> {
    entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.flavor_text))
}

/// Flavor and effect texts embed hard line and page breaks.
fn sanitize_text(text: &str) -> String {
    text.replace('\n', " ").replace('\u{000C}', " ")
}

/// Depth-first flattening of the chain tree. Children keep their listed
/// order; every branch carries depth = parent depth + 1.
fn flatten_chain(link: &ChainLink, depth: u8, stages: &mut Vec<EvolutionStage>) {
    stages.push(EvolutionStage {
        name: link.species.name.clone(),
        image_url: artwork_url(&link.species.name),
        depth,
    });
    for child in &link.evolves_to {
        flatten_chain(child, depth.saturating_add(1), stages);
    }
}

/// Image reference derived from the name alone; deterministic per name.
fn artwork_url(name: &str) -> String {
    format!("{ARTWORK_BASE}/{name}.jpg")
}

fn detail_images(sprites: &serde_json::Value) -> DetailImages {
    DetailImages {
        front_default: pointer_string(sprites, "/other/home/front_default"),
        front_shiny: pointer_string(sprites, "/other/home/front_shiny"),
        showdown_front_default: pointer_string(sprites, "/other/showdown/front_default"),
        showdown_front_shiny: pointer_string(sprites, "/other/showdown/front_shiny"),
    }
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

async fn fetch_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    debug!(%url, "GET");
    let response = http_client().get(url).send().await?;
    let response = response.error_for_status()?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| ApiError::Malformed {
        url: url.to_string(),
        message: err.to_string(),
    })
}

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new)
}
