// src/application/commands/hero_commands.rs
//
// Hero catalog and replay lookups. Read-only, no edit key needed.

use std::path::PathBuf;

use crate::application::{dto::*, state::AppState};
use crate::integrations::replay::ReplaySource;

/// Heroes in identifier order, optionally narrowed by a search filter
pub fn list_heroes(state: &AppState, filter: Option<&str>) -> Vec<HeroDto> {
    match filter.map(str::trim).filter(|filter| !filter.is_empty()) {
        Some(filter) => state.catalog.search(filter).map(HeroDto::from).collect(),
        None => state.catalog.heroes().map(HeroDto::from).collect(),
    }
}

pub fn list_roles(state: &AppState) -> Vec<String> {
    state.catalog.roles().into_iter().map(str::to_string).collect()
}

pub fn list_heroes_by_role(state: &AppState, role: &str) -> Vec<HeroDto> {
    state
        .catalog
        .heroes_with_role(role)
        .map(HeroDto::from)
        .collect()
}

/// Heroes played in one replay file, or the reason they could not be read
pub fn extract_replay_heroes(state: &AppState, path: &str) -> ReplayHeroesDto {
    state
        .extractor
        .extract_heroes(ReplaySource::Path(PathBuf::from(path)))
        .into()
}
