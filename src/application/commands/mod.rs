// src/application/commands/mod.rs
//
// Command handlers called by the UI layer

pub mod hero_commands;
pub mod match_series_commands;

pub use hero_commands::*;
pub use match_series_commands::*;
