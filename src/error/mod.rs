// src/error/mod.rs
//
// Application-wide error types

pub mod types;

pub use types::{AppError, AppResult};
