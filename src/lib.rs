// File: src/lib.rs

pub mod annotation;
pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod record;
pub use crate::config::RuleConfig;
pub use crate::core::engine::{AyahAnalysis, QalqalahEngine};
pub use crate::core::types::{Ayah, Confidence, DiacriticMark, Kind, Letter, QalqalahInstance, Word};
pub use crate::error::{QalqalahError, Result};
