// File: src/annotation.rs
use crate::core::types::{Ayah, Kind, QalqalahInstance, Word, WordIndex};
use serde::{Deserialize, Serialize};

/// How instances are matched back onto words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JoinKey {
    /// Exact word text. Two identical words in one ayah share every instance.
    #[default]
    WordText,
    /// 1-based word position. Unambiguous, but a repeated word without its
    /// own trigger stays unmarked.
    WordIndex,
}

impl JoinKey {
    fn matches(self, word: &Word, instance: &QalqalahInstance) -> bool {
        match self {
            JoinKey::WordText => instance.word_text == word.text(),
            JoinKey::WordIndex => instance.word_index == word.index(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnnotation {
    pub word_index: WordIndex,
    pub word_text: String,
    pub is_end_word: bool,
    pub instances: Vec<QalqalahInstance>,
    pub has_trigger: bool,
    /// Distinct kinds, in the order first seen.
    pub kinds: Vec<Kind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AyahSummary {
    pub total_occurrences: usize,
    pub strong_count: usize,
    pub light_count: usize,
    /// Distinct texts of words carrying a trigger, in reading order.
    pub words_with_trigger: Vec<String>,
    /// Distinct word texts of strong instances.
    pub primary_targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahAnnotation {
    pub surah_number: u32,
    pub ayah_number: u32,
    pub arabic_text: String,
    pub words: Vec<WordAnnotation>,
    pub summary: AyahSummary,
}

/// Folds detector output onto the ayah's words, joining on word text.
pub fn annotate(ayah: &Ayah, instances: &[QalqalahInstance]) -> AyahAnnotation {
    annotate_with(ayah, instances, JoinKey::WordText)
}

pub fn annotate_with(ayah: &Ayah, instances: &[QalqalahInstance], join: JoinKey) -> AyahAnnotation {
    let word_count = ayah.words().len();

    let words: Vec<WordAnnotation> = ayah
        .words()
        .iter()
        .map(|word| {
            let matched: Vec<QalqalahInstance> = instances
                .iter()
                .filter(|instance| join.matches(word, instance))
                .cloned()
                .collect();

            let mut kinds = Vec::new();
            for instance in &matched {
                if !kinds.contains(&instance.kind) {
                    kinds.push(instance.kind);
                }
            }

            WordAnnotation {
                word_index: word.index(),
                word_text: word.text().to_string(),
                is_end_word: word.index() == word_count,
                has_trigger: !matched.is_empty(),
                instances: matched,
                kinds,
            }
        })
        .collect();

    AyahAnnotation {
        surah_number: ayah.surah_number(),
        ayah_number: ayah.ayah_number(),
        arabic_text: ayah.text(),
        summary: summarize(&words, instances),
        words,
    }
}

fn summarize(words: &[WordAnnotation], instances: &[QalqalahInstance]) -> AyahSummary {
    let strong_count = instances.iter().filter(|i| i.kind == Kind::Strong).count();

    AyahSummary {
        total_occurrences: instances.len(),
        strong_count,
        light_count: instances.len() - strong_count,
        words_with_trigger: distinct(
            words.iter().filter(|w| w.has_trigger).map(|w| w.word_text.as_str()),
        ),
        primary_targets: distinct(
            instances
                .iter()
                .filter(|i| i.kind == Kind::Strong)
                .map(|i| i.word_text.as_str()),
        ),
    }
}

fn distinct<'a>(texts: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for text in texts {
        if !out.iter().any(|seen| seen == text) {
            out.push(text.to_string());
        }
    }
    out
}
