// File: src/record.rs
//! Serialisable shapes handed to downstream tooling. Field names are part of
//! the exported JSON format.

use crate::annotation::{AyahAnnotation, WordAnnotation};
use crate::core::types::{Kind, QalqalahInstance, WordIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word_index: WordIndex,
    pub word_text: String,
    pub tajweed_rules: Vec<Kind>,
    pub qalqalah_details: Vec<QalqalahInstance>,
    pub has_qalqalah: bool,
    pub is_end_word: bool,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub total_occurrences: usize,
    pub words_with_qalqalah: Vec<String>,
    pub qalqalah_kubra_count: usize,
    pub qalqalah_sughra_count: usize,
    pub primary_targets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahRecord {
    pub surah_number: u32,
    pub ayah_number: u32,
    pub arabic_text: String,
    pub words: Vec<WordRecord>,
    pub total_qalqalah_words: usize,
    pub qalqalah_summary: SummaryRecord,
}

/// Plain-language statement of the rules the records were produced under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescriptions {
    pub definition: String,
    pub letters: String,
    pub qalqalah_kubra: String,
    pub qalqalah_sughra: String,
    pub strict_conditions: Vec<String>,
}

impl RuleDescriptions {
    pub fn for_letters(letters: &[char]) -> Self {
        let letters = letters.iter().map(char::to_string).collect::<Vec<_>>().join(" ");
        Self {
            definition: "Qalqalah is a bouncing/echoing sound produced when pronouncing certain letters"
                .to_string(),
            letters,
            qalqalah_kubra: "Strong Qalqalah - occurs when stopping at the end of an ayah on a Qalqalah letter (becomes sakin)"
                .to_string(),
            qalqalah_sughra: "Light Qalqalah - occurs when a Qalqalah letter has sukoon within a word"
                .to_string(),
            strict_conditions: vec![
                "Letter must have sukoon (\u{0652}) or become sakin due to stopping".to_string(),
                "Tanween (\u{064b} \u{064d} \u{064c}) does NOT count as sukoon for Qalqalah".to_string(),
                "Only the last Qalqalah letter in the final word becomes sakin when stopping"
                    .to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surah_name: Option<String>,
    pub surah_number: u32,
    pub total_ayahs: usize,
    pub qalqalah_letters: Vec<char>,
    pub qalqalah_rules: RuleDescriptions,
}

/// A whole surah's worth of ayah records, in ayah order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurahRecord {
    pub metadata: SurahMetadata,
    pub ayahs: Vec<AyahRecord>,
}

impl SurahRecord {
    pub fn new(surah_number: u32, surah_name: Option<String>, trigger_letters: Vec<char>) -> Self {
        Self {
            metadata: SurahMetadata {
                surah_name,
                surah_number,
                total_ayahs: 0,
                qalqalah_rules: RuleDescriptions::for_letters(&trigger_letters),
                qalqalah_letters: trigger_letters,
            },
            ayahs: Vec::new(),
        }
    }

    pub fn push(&mut self, record: AyahRecord) {
        self.ayahs.push(record);
        self.metadata.total_ayahs = self.ayahs.len();
    }

    pub fn total_occurrences(&self) -> usize {
        self.ayahs.iter().map(|a| a.qalqalah_summary.total_occurrences).sum()
    }
}

impl From<&WordAnnotation> for WordRecord {
    fn from(word: &WordAnnotation) -> Self {
        let notes = if word.has_trigger {
            let labels: Vec<_> = word.instances.iter().map(|i| i.kind.label()).collect();
            format!("Qalqalah detected: {}", labels.join(", "))
        } else {
            "No Qalqalah detected".to_string()
        };

        Self {
            word_index: word.word_index,
            word_text: word.word_text.clone(),
            tajweed_rules: word.kinds.clone(),
            qalqalah_details: word.instances.clone(),
            has_qalqalah: word.has_trigger,
            is_end_word: word.is_end_word,
            notes,
        }
    }
}

impl AyahAnnotation {
    pub fn to_record(&self) -> AyahRecord {
        AyahRecord {
            surah_number: self.surah_number,
            ayah_number: self.ayah_number,
            arabic_text: self.arabic_text.clone(),
            words: self.words.iter().map(WordRecord::from).collect(),
            total_qalqalah_words: self.words.iter().filter(|w| w.has_trigger).count(),
            qalqalah_summary: SummaryRecord {
                total_occurrences: self.summary.total_occurrences,
                words_with_qalqalah: self.summary.words_with_trigger.clone(),
                qalqalah_kubra_count: self.summary.strong_count,
                qalqalah_sughra_count: self.summary.light_count,
                primary_targets: self.summary.primary_targets.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::QalqalahEngine;
    use serde_json::{json, Value};

    #[test]
    fn exported_json_uses_the_downstream_field_names() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(113, 2, "مِن شَرِّ مَا خَلَقَ");
        let record = engine.analyze(&ayah).annotation.to_record();
        let value: Value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["surah_number"], json!(113));
        assert_eq!(value["ayah_number"], json!(2));
        assert_eq!(value["total_qalqalah_words"], json!(1));
        assert_eq!(value["qalqalah_summary"]["qalqalah_kubra_count"], json!(1));
        assert_eq!(value["qalqalah_summary"]["qalqalah_sughra_count"], json!(0));
        assert_eq!(value["qalqalah_summary"]["primary_targets"], json!(["خَلَقَ"]));

        let last = &value["words"][3];
        assert_eq!(last["is_end_word"], json!(true));
        assert_eq!(last["has_qalqalah"], json!(true));
        assert_eq!(last["tajweed_rules"], json!(["Qalqalah_Kubra"]));
        assert_eq!(last["notes"], json!("Qalqalah detected: Qalqalah_Kubra"));

        let detail = &last["qalqalah_details"][0];
        assert_eq!(detail["word"], json!("خَلَقَ"));
        assert_eq!(detail["word_position"], json!(4));
        assert_eq!(detail["letter"], json!("ق"));
        assert_eq!(detail["letter_position"], json!(4));
        assert_eq!(detail["type"], json!("Qalqalah_Kubra"));
        assert_eq!(detail["confidence"], json!("High"));
        assert_eq!(detail["ayah_end"], json!(true));

        assert_eq!(value["words"][0]["tajweed_rules"], json!([]));
        assert_eq!(value["words"][0]["notes"], json!("No Qalqalah detected"));

        let mut surah = SurahRecord::new(
            113,
            Some("Al-Falaq".to_string()),
            engine.config().trigger_letters.clone(),
        );
        surah.push(record);
        let value: Value = serde_json::to_value(&surah).unwrap();
        let metadata = &value["metadata"];
        assert_eq!(metadata["surah_name"], json!("Al-Falaq"));
        assert_eq!(metadata["surah_number"], json!(113));
        assert_eq!(metadata["total_ayahs"], json!(1));
        assert_eq!(metadata["qalqalah_letters"], json!(["ق", "ط", "ب", "ج", "د"]));
        assert_eq!(metadata["qalqalah_rules"]["letters"], json!("ق ط ب ج د"));
        assert_eq!(
            metadata["qalqalah_rules"]["strict_conditions"].as_array().map(Vec::len),
            Some(3)
        );
        assert!(metadata["qalqalah_rules"]["qalqalah_kubra"].is_string());
        assert!(metadata["qalqalah_rules"]["qalqalah_sughra"].is_string());
    }

    #[test]
    fn notes_list_every_instance_of_a_word() {
        let engine = QalqalahEngine::new();
        // Both light instances of the first word are listed.
        let ayah = engine.ayah_from_text(1, 1, "قبد هُوَ");
        let record = engine.analyze(&ayah).annotation.to_record();

        assert_eq!(
            record.words[0].notes,
            "Qalqalah detected: Qalqalah_Sughra, Qalqalah_Sughra"
        );
        assert_eq!(record.total_qalqalah_words, 1);
    }

    #[test]
    fn unnamed_surah_omits_the_name() {
        let surah = SurahRecord::new(112, None, vec!['ق']);
        let value: Value = serde_json::to_value(&surah).unwrap();
        assert!(value["metadata"].get("surah_name").is_none());
        assert_eq!(value["metadata"]["total_ayahs"], json!(0));
    }
}
