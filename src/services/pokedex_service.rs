use std::time::Duration;

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::PokedexConfig;

/// What the Pokémon page shows next to the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonLookup {
    /// No name was asked for; no panel.
    NotRequested,
    Found(Pokemon),
    NotFound { name: String },
    /// The Pokédex could not be reached or answered with something unreadable.
    Unavailable { name: String },
}

impl PokemonLookup {
    pub fn requested_name(&self) -> Option<&str> {
        match self {
            PokemonLookup::NotRequested => None,
            PokemonLookup::Found(pokemon) => Some(&pokemon.name),
            PokemonLookup::NotFound { name } | PokemonLookup::Unavailable { name } => Some(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pokemon {
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub sprite: Option<String>,
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PokemonPayload {
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    sprites: SpritesPayload,
    #[serde(default)]
    types: Vec<TypeSlotPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct SpritesPayload {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotPayload {
    #[serde(rename = "type")]
    kind: NamedPayload,
}

#[derive(Debug, Deserialize)]
struct NamedPayload {
    name: String,
}

impl From<PokemonPayload> for Pokemon {
    fn from(payload: PokemonPayload) -> Self {
        Self {
            name: payload.name,
            height: payload.height,
            weight: payload.weight,
            sprite: payload.sprites.front_default,
            types: payload
                .types
                .into_iter()
                .map(|slot| slot.kind.name)
                .collect(),
        }
    }
}

/// Unauthenticated read-only client for the public Pokédex API.
#[derive(Clone)]
pub struct PokedexClient {
    http: reqwest::Client,
    base_url: Url,
}

impl PokedexClient {
    pub fn new(cfg: &PokedexConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&cfg.base_url)
            .with_context(|| format!("invalid pokedex base url: {}", cfg.base_url))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build pokedex http client")?;
        Ok(Self { http, base_url })
    }

    fn pokemon_url(&self, name: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push("pokemon")
            .push(name);
        Some(url)
    }

    /// One uncached `GET {base}/pokemon/{name}`; blank names skip the call.
    pub async fn lookup(&self, name: Option<&str>) -> PokemonLookup {
        let Some(name) = name
            .map(|raw| raw.trim().to_lowercase())
            .filter(|name| !name.is_empty())
        else {
            return PokemonLookup::NotRequested;
        };

        let Some(url) = self.pokemon_url(&name) else {
            tracing::warn!(base_url = %self.base_url, "pokedex base url cannot take path segments");
            return PokemonLookup::Unavailable { name };
        };

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%name, error = %err, "pokedex request failed");
                return PokemonLookup::Unavailable { name };
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%name, %status, "pokemon not found");
            return PokemonLookup::NotFound { name };
        }

        match response.json::<PokemonPayload>().await {
            Ok(payload) => PokemonLookup::Found(payload.into()),
            Err(err) => {
                tracing::warn!(%name, error = %err, "pokedex response could not be decoded");
                PokemonLookup::Unavailable { name }
            }
        }
    }
}
