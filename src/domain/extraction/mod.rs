// src/domain/extraction/mod.rs
//
// Extraction Domain
//
// Value objects describing the outcome of reading heroes out of a replay.
// No I/O and no persistence here; the extractor service produces these.

pub mod value_objects;

pub use value_objects::{
    CrossValidation, ExtractedHeroes, ExtractionResult, ExtractionStrategy, HeroFilter,
    HEROES_PER_REPLAY,
};
