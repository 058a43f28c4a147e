pub mod entity;
pub mod invariants;

pub use entity::{MatchSeries, PAIRED_HEROES};
pub use invariants::{validate_match_series, MAX_NAME_LENGTH};
