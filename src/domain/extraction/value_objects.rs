// src/domain/extraction/value_objects.rs
//
// Extraction Value Objects
//
// Pure, immutable data describing what came out of a replay.
//
// CRITICAL INVARIANTS:
// - A successful extraction holds exactly HEROES_PER_REPLAY heroes
// - A failure holds a human-readable message, never partial data

use serde::{Deserialize, Serialize};

use crate::domain::HeroId;

/// Heroes taking part in one game
pub const HEROES_PER_REPLAY: usize = 10;

// ============================================================================
// EXTRACTION RESULT (TOP-LEVEL OUTCOME)
// ============================================================================

/// The outcome of extracting heroes from one replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExtractionResult {
    Success(ExtractedHeroes),

    /// Normalized, user-facing failure message
    Failure(String),
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExtractionResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ExtractionResult::Failure(_))
    }

    pub fn extracted(&self) -> Option<&ExtractedHeroes> {
        match self {
            ExtractionResult::Success(extracted) => Some(extracted),
            ExtractionResult::Failure(_) => None,
        }
    }

    pub fn heroes(&self) -> Option<&[HeroId]> {
        match self {
            ExtractionResult::Success(extracted) => Some(extracted.heroes()),
            ExtractionResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ExtractionResult::Success(_) => None,
            ExtractionResult::Failure(message) => Some(message),
        }
    }

    /// Convert into a plain Result, the failure message becoming the error
    pub fn into_result(self) -> Result<ExtractedHeroes, String> {
        match self {
            ExtractionResult::Success(extracted) => Ok(extracted),
            ExtractionResult::Failure(message) => Err(message),
        }
    }
}

// ============================================================================
// EXTRACTED HEROES (SUCCESSFUL EXTRACTION)
// ============================================================================

/// Exactly ten heroes and the strategy that found them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedHeroes {
    heroes: Vec<HeroId>,
    strategy: ExtractionStrategy,
}

impl ExtractedHeroes {
    /// Returns None unless exactly HEROES_PER_REPLAY heroes are given
    pub fn new(heroes: Vec<HeroId>, strategy: ExtractionStrategy) -> Option<Self> {
        (heroes.len() == HEROES_PER_REPLAY).then_some(Self { heroes, strategy })
    }

    pub fn heroes(&self) -> &[HeroId] {
        &self.heroes
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    pub fn into_heroes(self) -> Vec<HeroId> {
        self.heroes
    }
}

// ============================================================================
// STRATEGY
// ============================================================================

/// Where in the replay the heroes were read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Hero display names in the player list (fast, language dependent)
    Details,

    /// `PlayerSpawned` tracker events (slower, language independent)
    TrackerEvents,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Details => write!(f, "details"),
            ExtractionStrategy::TrackerEvents => write!(f, "tracker_events"),
        }
    }
}

/// Whether strategies keep names that are not in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroFilter {
    /// Drop anything the catalog does not know (production use)
    CatalogOnly,

    /// Keep every name found (strategy cross-checks)
    Unfiltered,
}

// ============================================================================
// CROSS VALIDATION
// ============================================================================

/// Both strategies run unfiltered over the same replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    pub details: Vec<HeroId>,
    pub tracker_events: Vec<HeroId>,
}

impl CrossValidation {
    /// True when both strategies found ten heroes and the same ones
    pub fn agrees(&self) -> bool {
        if self.details.len() != HEROES_PER_REPLAY || self.tracker_events.len() != HEROES_PER_REPLAY {
            return false;
        }
        let mut details = self.details.clone();
        let mut tracker_events = self.tracker_events.clone();
        details.sort();
        tracker_events.sort();
        details == tracker_events
    }
}
