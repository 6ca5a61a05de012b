// File: src/config.rs
//! Rule configuration injected into the engine at construction.

use crate::annotation::JoinKey;
use crate::core::diacritics::{MarkTable, SMALL_HIGH_SUKOON};
use crate::core::quiescence::QuiescencePolicy;
use crate::core::types::DiacriticMark;
use crate::error::{QalqalahError, Result};
use serde::{Deserialize, Serialize};

/// The five Qalqalah letters: qaf, ta, ba, jim, dal.
pub const QALQALAH_LETTERS: [char; 5] = ['ق', 'ط', 'ب', 'ج', 'د'];

/// Immutable rule set. Swapping the trigger letters or the mark table lets
/// the same engine run against other letter groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub trigger_letters: Vec<char>,
    pub marks: MarkTable,
    pub quiescence: QuiescencePolicy,
    pub join_key: JoinKey,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            trigger_letters: QALQALAH_LETTERS.to_vec(),
            marks: MarkTable::standard(),
            quiescence: QuiescencePolicy::default(),
            join_key: JoinKey::default(),
        }
    }
}

impl RuleConfig {
    /// Default rules with the Uthmani sukoon glyph recognised.
    pub fn uthmani() -> Self {
        let mut config = Self::default();
        config.recognise_uthmani_sukoon();
        config
    }

    /// Adds the Uthmani sukoon glyph to whatever mark table is loaded.
    pub fn recognise_uthmani_sukoon(&mut self) {
        self.marks.insert(SMALL_HIGH_SUKOON, DiacriticMark::ExplicitSukoon);
    }

    pub fn is_trigger(&self, c: char) -> bool {
        self.trigger_letters.contains(&c)
    }

    pub fn validate(&self) -> Result<()> {
        if self.trigger_letters.is_empty() {
            return Err(QalqalahError::InvalidConfig(
                "trigger letter set is empty".to_string(),
            ));
        }
        if let Some(&c) = self.trigger_letters.iter().find(|&&c| self.marks.get(c).is_some()) {
            return Err(QalqalahError::InvalidConfig(format!(
                "trigger letter {:?} (U+{:04X}) is also a diacritic mark",
                c, c as u32
            )));
        }
        if self.marks.is_empty() {
            tracing::warn!("mark table is empty; every character will be a base letter");
        }
        Ok(())
    }
}
