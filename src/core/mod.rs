// File: src/core/mod.rs

pub mod diacritics;
pub mod engine;
pub mod quiescence;
pub mod types;
