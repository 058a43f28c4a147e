// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - Events never carry edit keys

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::extraction::ExtractionStrategy;
use crate::domain::HeroId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! domain_event {
    ($name:ident) => {
        impl DomainEvent for $name {
            fn event_id(&self) -> Uuid { self.event_id }
            fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
            fn event_type(&self) -> &'static str { stringify!($name) }
        }
    };
}

// ============================================================================
// MATCH SERIES EVENTS
// ============================================================================

/// Emitted when a new match series is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSeriesCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub series_id: Uuid,
    pub name: String,
    pub pre_banned_count: usize,
}

impl MatchSeriesCreated {
    pub fn new(series_id: Uuid, name: String, pre_banned_count: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            series_id,
            name,
            pre_banned_count,
        }
    }
}

domain_event!(MatchSeriesCreated);

/// Emitted after an authorized ban update has been committed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroBansUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub series_id: Uuid,
    pub banned: Vec<HeroId>,
    pub unbanned: Vec<HeroId>,
    /// True when the paired-hero rule had to ban a partner
    pub paired_correction: bool,
}

impl HeroBansUpdated {
    pub fn new(
        series_id: Uuid,
        banned: Vec<HeroId>,
        unbanned: Vec<HeroId>,
        paired_correction: bool,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            series_id,
            banned,
            unbanned,
            paired_correction,
        }
    }
}

domain_event!(HeroBansUpdated);

/// Emitted when a ban update is refused for lack of permission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeroBanRejected {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub series_id: Uuid,
}

impl HeroBanRejected {
    pub fn new(series_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            series_id,
        }
    }
}

domain_event!(HeroBanRejected);

// ============================================================================
// REPLAY EXTRACTION EVENTS
// ============================================================================

/// Emitted when ten heroes were recovered from a replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayHeroesExtracted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub heroes: Vec<HeroId>,
    pub strategy: ExtractionStrategy,
}

impl ReplayHeroesExtracted {
    pub fn new(heroes: Vec<HeroId>, strategy: ExtractionStrategy) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            heroes,
            strategy,
        }
    }
}

domain_event!(ReplayHeroesExtracted);

/// Emitted when a replay could not be turned into a hero list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayExtractionFailed {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub message: String,
}

impl ReplayExtractionFailed {
    pub fn new(message: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            message,
        }
    }
}

domain_event!(ReplayExtractionFailed);
