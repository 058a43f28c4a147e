// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod extraction_strategies;
pub mod match_series_manager;
pub mod replay_hero_extractor;

#[cfg(test)]
mod match_series_manager_tests;

// Re-export all services and their types
pub use extraction_strategies::{
    heroes_from_details,
    heroes_from_tracker_events,
    DETAILS_ENTRY,
    TRACKER_EVENTS_ENTRY,
};

pub use match_series_manager::{
    EditPermission,
    MatchSeriesManager,
};

pub use replay_hero_extractor::ReplayHeroExtractor;
