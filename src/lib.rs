// src/lib.rs
// Meta Madness Tracker - hero bans for match series
//
// Architecture:
// - Domain-centric: heroes, match series and extraction results live in domain/
// - Event-driven: services report what happened through the event bus
// - Explicit: the hero catalog and every collaborator are injected, never global
// - Replay decoding sits behind traits in integrations/replay
// - Application Layer: UI boundary

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    canonicalize,
    validate_match_series,
    CatalogError,
    CrossValidation,
    DomainError,
    ExtractedHeroes,
    ExtractionResult,
    ExtractionStrategy,
    // Heroes
    Hero,
    HeroCatalog,
    HeroFilter,
    HeroId,
    // Match series
    MatchSeries,
    UnrecognizedHeroes,
    HEROES_PER_REPLAY,
    MAX_NAME_LENGTH,
    PAIRED_HEROES,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    EventLogEntry,
    HeroBanRejected,
    HeroBansUpdated,
    MatchSeriesCreated,
    ReplayExtractionFailed,
    ReplayHeroesExtracted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool, DatabaseConfig};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{MatchSeriesRepository, SqliteMatchSeriesRepository};

// ============================================================================
// PUBLIC API - Replay Boundary
// ============================================================================

pub use integrations::replay::{
    ArchiveOpener,
    DecodedValue,
    ExtractionError,
    MemoryArchive,
    ProtocolResolver,
    ReplayArchive,
    ReplayDecoder,
    ReplayHeader,
    ReplaySource,
    UNSUCCESSFUL_EXTRACTION_MESSAGE,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{EditPermission, MatchSeriesManager, ReplayHeroExtractor};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType, MatchSeriesView};
