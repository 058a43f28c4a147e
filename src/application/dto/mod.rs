// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Edit keys only ever leave through CreatedMatchSeriesDto

use serde::{Deserialize, Serialize};

use crate::domain::{ExtractionResult, Hero, MatchSeries};
use crate::services::MatchSeriesManager;

// ============================================================================
// MATCH SERIES DTOs
// ============================================================================

/// A series as shown to any visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSeriesView {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub banned_heroes: Vec<String>,
    pub banned_count: usize,
    pub can_edit: bool,
}

impl From<&MatchSeriesManager> for MatchSeriesView {
    fn from(manager: &MatchSeriesManager) -> Self {
        let series = manager.match_series();
        Self {
            id: series.id.to_string(),
            name: series.name.clone(),
            created_at: series.created_at.to_rfc3339(),
            banned_heroes: series.banned_heroes().map(|hero| hero.to_string()).collect(),
            banned_count: series.banned_count(),
            can_edit: manager.can_edit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchSeriesDto {
    pub name: String,
    /// Free-form hero names, one per line
    pub pre_banned: String,
}

/// Returned once, to the creator of a series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedMatchSeriesDto {
    pub id: String,
    pub edit_key: String,
}

impl From<&MatchSeries> for CreatedMatchSeriesDto {
    fn from(series: &MatchSeries) -> Self {
        Self {
            id: series.id.to_string(),
            edit_key: series.edit_key.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetHeroBansDto {
    pub series_id: String,
    pub edit_key: Option<String>,
    /// Free-form hero names, one per line
    pub ban: String,
    pub unban: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BanFromReplaysDto {
    pub series_id: String,
    pub edit_key: Option<String>,
    pub replay_paths: Vec<String>,
    #[serde(default)]
    pub extra_bans: String,
    #[serde(default)]
    pub unbans: String,
}

// ============================================================================
// HERO DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroDto {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl From<&Hero> for HeroDto {
    fn from(hero: &Hero) -> Self {
        Self {
            id: hero.id.to_string(),
            name: hero.name.clone(),
            role: hero.role.clone(),
        }
    }
}

// ============================================================================
// REPLAY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayHeroesDto {
    pub success: bool,
    pub heroes: Vec<String>,
    pub message: Option<String>,
}

impl From<ExtractionResult> for ReplayHeroesDto {
    fn from(result: ExtractionResult) -> Self {
        match result {
            ExtractionResult::Success(extracted) => Self {
                success: true,
                heroes: extracted.heroes().iter().map(|hero| hero.to_string()).collect(),
                message: None,
            },
            ExtractionResult::Failure(message) => Self {
                success: false,
                heroes: Vec::new(),
                message: Some(message),
            },
        }
    }
}
