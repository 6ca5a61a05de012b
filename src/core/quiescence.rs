// File: src/core/quiescence.rs
use crate::core::types::{DiacriticMark, Word};
use serde::{Deserialize, Serialize};

/// Which rule made a letter quiescent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuiescenceReason {
    /// Written with a sukoon.
    ExplicitSukoon,
    /// Final letter of the final word; the vowel drops when recitation stops.
    StopPosition,
    /// No vowel mark at all before the next letter of the word.
    UnmarkedCluster,
}

impl QuiescenceReason {
    pub fn describe(self) -> &'static str {
        match self {
            QuiescenceReason::ExplicitSukoon => "marked with sukoon",
            QuiescenceReason::StopPosition => "stopping position - becomes sakin",
            QuiescenceReason::UnmarkedCluster => "no vowel mark before the next letter",
        }
    }
}

/// Switches for the rules that are heuristics rather than orthography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuiescencePolicy {
    /// Treat an unmarked letter followed by another letter as silent. Misfires
    /// on text that simply lacks diacritics.
    pub unmarked_cluster: bool,
}

impl Default for QuiescencePolicy {
    fn default() -> Self {
        Self { unmarked_cluster: true }
    }
}

/// Decides whether a letter is pronounced without a following vowel.
#[derive(Debug, Clone, Default)]
pub struct QuiescenceResolver {
    policy: QuiescencePolicy,
}

impl QuiescenceResolver {
    pub fn new(policy: QuiescencePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> QuiescencePolicy {
        self.policy
    }

    /// Applies the rules in priority order and reports the first that fires.
    /// Tanween never silences a letter; it can only be overridden by the stop.
    pub fn resolve(
        &self,
        word: &Word,
        letter_index: usize,
        is_last_word: bool,
    ) -> Option<QuiescenceReason> {
        let letter = word.letter(letter_index)?;

        let reason = if letter.mark == DiacriticMark::ExplicitSukoon {
            Some(QuiescenceReason::ExplicitSukoon)
        } else if is_last_word && word.is_final_letter(letter_index) {
            Some(QuiescenceReason::StopPosition)
        } else if self.policy.unmarked_cluster
            && !letter.mark.is_vowel_bearing()
            && !word.is_final_letter(letter_index)
        {
            Some(QuiescenceReason::UnmarkedCluster)
        } else {
            None
        };

        tracing::trace!(
            word = word.text(),
            letter_index,
            is_last_word,
            ?reason,
            "resolved quiescence"
        );
        reason
    }

    pub fn is_quiescent(&self, word: &Word, letter_index: usize, is_last_word: bool) -> bool {
        self.resolve(word, letter_index, is_last_word).is_some()
    }
}
