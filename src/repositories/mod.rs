// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod match_series_repository;

pub use match_series_repository::{MatchSeriesRepository, SqliteMatchSeriesRepository};
