pub mod catalog;
pub mod name;

pub use catalog::{CatalogError, Hero, HeroCatalog, UnrecognizedHeroes};
pub use name::{canonicalize, HeroId};
