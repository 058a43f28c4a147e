// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod extraction;
pub mod hero;
pub mod match_series;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Extraction Domain
pub use extraction::{
    CrossValidation, ExtractedHeroes, ExtractionResult, ExtractionStrategy, HeroFilter,
    HEROES_PER_REPLAY,
};

// Hero Domain
pub use hero::{canonicalize, CatalogError, Hero, HeroCatalog, HeroId, UnrecognizedHeroes};

// Match Series Domain
pub use match_series::{validate_match_series, MatchSeries, MAX_NAME_LENGTH, PAIRED_HEROES};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown hero: {0}")]
    UnknownHero(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
