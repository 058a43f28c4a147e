// src/domain/hero/catalog.rs
//
// Hero Catalog - static reference data
//
// Loaded once at startup from `data/heroes.json` (embedded at compile time) and
// shared read-only afterwards. The file is a JSON object keyed by canonical hero
// identifier:
//
//   "kelthuzad": { "name": "Kel'Thuzad", "role": "Ranged Assassin",
//                  "player_spawned_name": "KelThuzad" }
//
// `player_spawned_name` is the value the game writes into `PlayerSpawned` tracker
// events, which is how heroes are recognised independently of the client language.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

use super::name::{canonicalize, HeroId};

const EMBEDDED_HEROES: &str = include_str!("../../../data/heroes.json");

/// Malformed catalog configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid hero catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not read hero catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hero '{hero}' is missing required field '{field}'")]
    MissingField { hero: String, field: &'static str },

    #[error("Hero key '{key}' does not match its canonical name '{expected}'")]
    IdentifierMismatch { key: String, expected: String },

    #[error("Spawn event key '{key}' is used by both '{first}' and '{second}'")]
    DuplicateSpawnKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("Hero catalog is empty")]
    Empty,
}

/// Raw names that did not match any catalog hero
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Some of the hero names could not be recognized: {}", names.join(", "))]
pub struct UnrecognizedHeroes {
    pub names: Vec<String>,
}

/// A playable hero
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub id: HeroId,

    /// Display name ("Kel'Thuzad")
    pub name: String,

    /// Role tag ("Tank", "Healer", ...)
    pub role: String,

    /// Identifier used by the `PlayerSpawned` tracker event
    pub spawn_event_key: String,
}

#[derive(Debug, Deserialize)]
struct HeroEntry {
    name: Option<String>,
    role: Option<String>,
    player_spawned_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HeroCatalog {
    heroes: BTreeMap<HeroId, Hero>,
    by_spawn_key: HashMap<String, HeroId>,
}

impl HeroCatalog {
    /// Load the catalog bundled with the crate
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_HEROES)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let entries: BTreeMap<String, HeroEntry> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut heroes = BTreeMap::new();
        let mut by_spawn_key: HashMap<String, HeroId> = HashMap::new();

        for (key, entry) in entries {
            let name = required(&key, "name", entry.name)?;
            let role = required(&key, "role", entry.role)?;
            let spawn_event_key = required(&key, "player_spawned_name", entry.player_spawned_name)?;

            let expected = canonicalize(&name);
            if key != expected {
                return Err(CatalogError::IdentifierMismatch { key, expected });
            }
            let id = HeroId::canonicalize(&key);

            if let Some(first) = by_spawn_key.get(&spawn_event_key) {
                return Err(CatalogError::DuplicateSpawnKey {
                    key: spawn_event_key,
                    first: first.to_string(),
                    second: key,
                });
            }
            by_spawn_key.insert(spawn_event_key.clone(), id.clone());

            heroes.insert(
                id.clone(),
                Hero {
                    id,
                    name,
                    role,
                    spawn_event_key,
                },
            );
        }

        log::debug!("Loaded hero catalog with {} heroes", heroes.len());

        Ok(Self {
            heroes,
            by_spawn_key,
        })
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.heroes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Hero> {
        self.heroes.get(id)
    }

    pub fn role_of(&self, id: &str) -> Option<&str> {
        self.heroes.get(id).map(|hero| hero.role.as_str())
    }

    /// Reverse lookup from a `PlayerSpawned` event value
    pub fn hero_for_spawn_key(&self, spawn_event_key: &str) -> Option<&HeroId> {
        self.by_spawn_key.get(spawn_event_key)
    }

    /// Identifiers in sorted order
    pub fn ids(&self) -> impl Iterator<Item = &HeroId> {
        self.heroes.keys()
    }

    pub fn heroes(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.values()
    }

    pub fn roles(&self) -> BTreeSet<&str> {
        self.heroes.values().map(|hero| hero.role.as_str()).collect()
    }

    pub fn heroes_with_role<'a>(&'a self, role: &'a str) -> impl Iterator<Item = &'a Hero> + 'a {
        self.heroes.values().filter(move |hero| hero.role == role)
    }

    /// Name search as typed by a user.
    ///
    /// A hero matches when its identifier starts with the canonicalized filter
    /// ("azmo" -> azmodan) or when any word of its display name does
    /// ("ham" -> Sgt. Hammer). An empty filter matches everything.
    pub fn search<'a>(&'a self, filter: &str) -> impl Iterator<Item = &'a Hero> + 'a {
        let needle = canonicalize(filter);
        self.heroes.values().filter(move |hero| {
            hero.id.as_str().starts_with(&needle)
                || hero
                    .name
                    .split(|c: char| c == '-' || c.is_whitespace())
                    .any(|part| canonicalize(part).starts_with(&needle))
        })
    }

    /// Parse a newline-separated list of free-form hero names.
    ///
    /// Blank lines are skipped. Fails with every line that matched no hero.
    pub fn parse_hero_list(&self, text: &str) -> Result<BTreeSet<HeroId>, UnrecognizedHeroes> {
        let mut recognized = BTreeSet::new();
        let mut unrecognized = Vec::new();

        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let id = HeroId::canonicalize(line);
            if self.contains(id.as_str()) {
                recognized.insert(id);
            } else {
                unrecognized.push(line.to_string());
            }
        }

        if unrecognized.is_empty() {
            Ok(recognized)
        } else {
            Err(UnrecognizedHeroes {
                names: unrecognized,
            })
        }
    }
}

fn required(hero: &str, field: &'static str, value: Option<String>) -> Result<String, CatalogError> {
    value.ok_or_else(|| CatalogError::MissingField {
        hero: hero.to_string(),
        field,
    })
}
