// File: src/core/engine.rs
use crate::annotation::{annotate_with, AyahAnnotation};
use crate::config::RuleConfig;
use crate::core::diacritics::DiacriticClassifier;
use crate::core::quiescence::{QuiescenceReason, QuiescenceResolver};
use crate::core::types::{Ayah, Confidence, Kind, QalqalahInstance, Word};
use serde::{Deserialize, Serialize};

/// Everything produced for one ayah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AyahAnalysis {
    pub strong_count: usize,
    pub light_count: usize,
    pub instances: Vec<QalqalahInstance>,
    pub annotation: AyahAnnotation,
}

// The engine is composed of the classifier and resolver, both built from the
// same injected config. It holds no per-ayah state.
#[derive(Debug, Clone)]
pub struct QalqalahEngine {
    config: RuleConfig,
    classifier: DiacriticClassifier,
    resolver: QuiescenceResolver,
}

impl QalqalahEngine {
    pub fn new() -> Self {
        Self::with_config(RuleConfig::default())
    }

    pub fn with_config(config: RuleConfig) -> Self {
        Self {
            classifier: DiacriticClassifier::new(config.marks.clone()),
            resolver: QuiescenceResolver::new(config.quiescence),
            config,
        }
    }

    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    pub fn classifier(&self) -> &DiacriticClassifier {
        &self.classifier
    }

    pub fn resolver(&self) -> &QuiescenceResolver {
        &self.resolver
    }

    /// Builds an ayah from pre-segmented words.
    pub fn ayah<I, S>(&self, surah_number: u32, ayah_number: u32, words: I) -> Ayah
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words = words
            .into_iter()
            .map(Into::into)
            .enumerate()
            .map(|(i, text)| {
                let letters = self.classifier.segment(&text);
                Word::new(text, i + 1, letters)
            })
            .collect();
        Ayah::new(surah_number, ayah_number, words)
    }

    /// Builds an ayah from a line of text, splitting on whitespace.
    pub fn ayah_from_text(&self, surah_number: u32, ayah_number: u32, text: &str) -> Ayah {
        self.ayah(surah_number, ayah_number, text.split_whitespace())
    }

    /// Single forward pass: the strong candidate of the last word first, then
    /// light instances of every earlier word in reading order.
    pub fn detect(&self, ayah: &Ayah) -> Vec<QalqalahInstance> {
        let mut instances = Vec::new();
        let Some((last_word, earlier_words)) = ayah.words().split_last() else {
            return instances;
        };

        if let Some(instance) = self.strong_candidate(ayah, last_word) {
            instances.push(instance);
        }

        for word in earlier_words {
            for (letter_index, letter) in word.letters().iter().enumerate() {
                if !self.config.is_trigger(letter.base) {
                    continue;
                }
                if let Some(reason) = self.resolver.resolve(word, letter_index, false) {
                    instances.push(self.light_instance(word, letter_index, reason));
                }
            }
        }

        for instance in &instances {
            tracing::debug!(
                ayah = ayah.ayah_number(),
                word = instance.word_index,
                letter = %instance.letter,
                kind = ?instance.kind,
                "qalqalah detected"
            );
        }
        instances
    }

    pub fn analyze(&self, ayah: &Ayah) -> AyahAnalysis {
        let instances = self.detect(ayah);
        let annotation = annotate_with(ayah, &instances, self.config.join_key);
        AyahAnalysis {
            strong_count: annotation.summary.strong_count,
            light_count: annotation.summary.light_count,
            instances,
            annotation,
        }
    }

    // Only the rightmost trigger letter of the last word is ever tested; the
    // earlier ones keep their vowels when recitation stops.
    fn strong_candidate(&self, ayah: &Ayah, word: &Word) -> Option<QalqalahInstance> {
        let letter_index = word
            .letters()
            .iter()
            .rposition(|letter| self.config.is_trigger(letter.base))?;
        let reason = self.resolver.resolve(word, letter_index, true)?;
        let letter = &word.letters()[letter_index];

        Some(QalqalahInstance {
            word_text: word.text().to_string(),
            word_index: word.index(),
            letter: letter.base,
            letter_index,
            char_offset: letter.offset,
            kind: Kind::Strong,
            confidence: Confidence::High,
            justification: format!(
                "Qalqalah letter {} at end of ayah {} ({})",
                letter.base,
                ayah.ayah_number(),
                reason.describe()
            ),
            ayah_end: true,
        })
    }

    fn light_instance(
        &self,
        word: &Word,
        letter_index: usize,
        reason: QuiescenceReason,
    ) -> QalqalahInstance {
        let letter = &word.letters()[letter_index];
        let mut justification = format!("Qalqalah letter {} with sukoon within word", letter.base);
        if reason == QuiescenceReason::UnmarkedCluster {
            justification.push_str(&format!(" ({})", reason.describe()));
        }

        QalqalahInstance {
            word_text: word.text().to_string(),
            word_index: word.index(),
            letter: letter.base,
            letter_index,
            char_offset: letter.offset,
            kind: Kind::Light,
            confidence: Confidence::Medium,
            justification,
            ayah_end: false,
        }
    }
}

impl Default for QalqalahEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quiescence::QuiescencePolicy;

    fn kinds(instances: &[QalqalahInstance]) -> (usize, usize) {
        let strong = instances.iter().filter(|i| i.kind == Kind::Strong).count();
        (strong, instances.len() - strong)
    }

    #[test]
    fn falaq_first_ayah_stops_on_final_qaf() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(113, 1, "قُلْ أَعُوذُ بِرَبِّ الْفَلَقِ");
        let instances = engine.detect(&ayah);

        // The sukoon of قُلْ sits on lam, not on qaf.
        assert_eq!(kinds(&instances), (1, 0));
        let strong = &instances[0];
        assert_eq!(strong.letter, 'ق');
        assert_eq!(strong.word_index, 4);
        assert_eq!(strong.letter_index, 4);
        assert_eq!(strong.char_offset, 7);
        assert_eq!(strong.confidence, Confidence::High);
        assert!(strong.ayah_end);
    }

    #[test]
    fn vowel_on_final_letter_does_not_block_the_stop() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(113, 2, "مِن شَرِّ مَا خَلَقَ");
        let instances = engine.detect(&ayah);

        assert_eq!(kinds(&instances), (1, 0));
        assert_eq!(instances[0].word_text, "خَلَقَ");
        assert!(instances[0].justification.contains("stopping position"));
    }

    #[test]
    fn no_trigger_letter_means_no_instances() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(114, 6, "وَالنَّاسِ");
        assert!(engine.detect(&ayah).is_empty());
    }

    #[test]
    fn empty_ayah_is_empty_output() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(1, 1, "   ");
        let analysis = engine.analyze(&ayah);
        assert!(analysis.instances.is_empty());
        assert_eq!((analysis.strong_count, analysis.light_count), (0, 0));
        assert!(analysis.annotation.words.is_empty());
    }

    #[test]
    fn explicit_sukoon_mid_ayah_is_light() {
        let engine = QalqalahEngine::new();
        // al-Ikhlas 3: lam yalid wa lam yulad
        let ayah = engine.ayah_from_text(112, 3, "لَمْ يَلِدْ وَلَمْ يُولَدْ");
        let instances = engine.detect(&ayah);

        assert_eq!(kinds(&instances), (1, 1));
        assert_eq!(instances[0].kind, Kind::Strong);
        assert_eq!(instances[0].word_text, "يُولَدْ");
        assert_eq!(instances[1].kind, Kind::Light);
        assert_eq!(instances[1].word_text, "يَلِدْ");
        assert_eq!(instances[1].confidence, Confidence::Medium);
        assert_eq!(
            instances[1].justification,
            "Qalqalah letter د with sukoon within word"
        );
    }

    #[test]
    fn only_the_rightmost_trigger_of_the_last_word_counts() {
        let engine = QalqalahEngine::new();
        // qaf and ba are both triggers; ba is rightmost.
        let ayah = engine.ayah_from_text(113, 3, "وَمِن شَرِّ غَاسِقٍ إِذَا وَقَبَ");
        let instances = engine.detect(&ayah);

        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].letter, 'ب');
        assert_eq!(instances[0].letter_index, 2);
    }

    #[test]
    fn tanween_blocks_light_qalqalah() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(113, 5, "وَمِن شَرِّ حَاسِدٍ إِذَا حَسَدَ");
        let instances = engine.detect(&ayah);

        assert_eq!(kinds(&instances), (1, 0));
        assert!(instances.iter().all(|i| i.word_text != "حَاسِدٍ"));
    }

    #[test]
    fn rightmost_trigger_that_keeps_its_vowel_is_not_strong() {
        let engine = QalqalahEngine::new();
        // qaf is the only trigger and is followed by alif and lam.
        let ayah = engine.ayah_from_text(2, 30, "إِذْ قَالَ");
        assert!(engine.detect(&ayah).is_empty());
    }

    #[test]
    fn single_word_ayah_is_both_first_and_last() {
        let engine = QalqalahEngine::new();
        // Tanween on the final dal gives way to the stop.
        let ayah = engine.ayah(112, 1, ["أَحَدٌ"]);
        let instances = engine.detect(&ayah);
        assert_eq!(kinds(&instances), (1, 0));
        assert_eq!(instances[0].word_index, 1);
        assert_eq!(instances[0].letter, 'د');
    }

    #[test]
    fn cluster_heuristic_can_be_switched_off() {
        let bare = "قبل هذا";
        let with = QalqalahEngine::new();
        let without = QalqalahEngine::with_config(RuleConfig {
            quiescence: QuiescencePolicy { unmarked_cluster: false },
            ..RuleConfig::default()
        });

        let found = with.detect(&with.ayah_from_text(1, 1, bare));
        assert_eq!(kinds(&found), (0, 2));
        assert!(found[0].justification.contains("no vowel mark"));

        assert!(without.detect(&without.ayah_from_text(1, 1, bare)).is_empty());
    }

    #[test]
    fn alternate_trigger_set_reuses_the_engine() {
        let engine = QalqalahEngine::with_config(RuleConfig {
            trigger_letters: vec!['ل'],
            ..RuleConfig::default()
        });
        let ayah = engine.ayah_from_text(113, 1, "قُلْ أَعُوذُ بِرَبِّ الْفَلَقِ");
        let instances = engine.detect(&ayah);

        // lam of قُلْ carries sukoon; the last word's rightmost lam is vowelled.
        assert_eq!(kinds(&instances), (0, 1));
        assert_eq!(instances[0].word_index, 1);
    }

    #[test]
    fn trailing_unknown_mark_keeps_the_stop() {
        let engine = QalqalahEngine::new();
        // The pause sign after the final ba is outside the mark table.
        let ayah = engine.ayah_from_text(113, 3, "إِذَا وَقَبَ\u{06d6}");
        let instances = engine.detect(&ayah);

        assert_eq!(kinds(&instances), (1, 0));
        assert_eq!(instances[0].letter, 'ب');
        assert_eq!(instances[0].letter_index, 2);
    }

    #[test]
    fn uthmani_sukoon_without_its_table_still_stops() {
        let engine = QalqalahEngine::with_config(RuleConfig {
            quiescence: QuiescencePolicy { unmarked_cluster: false },
            ..RuleConfig::default()
        });
        let ayah = engine.ayah_from_text(
            112,
            3,
            "ل\u{064e}م\u{06e1} ي\u{064e}ل\u{0650}د\u{06e1} و\u{064e}ل\u{064e}م\u{06e1} ي\u{064f}ول\u{064e}د\u{06e1}",
        );
        let instances = engine.detect(&ayah);

        // Only the stop applies; the mid-ayah dal is not recognised as silent.
        assert_eq!(kinds(&instances), (1, 0));
        assert_eq!(instances[0].word_text, "ي\u{064f}ول\u{064e}د\u{06e1}");
        assert_eq!(instances[0].letter_index, 3);
    }

    #[test]
    fn detect_is_idempotent() {
        let engine = QalqalahEngine::new();
        let ayah = engine.ayah_from_text(112, 3, "لَمْ يَلِدْ وَلَمْ يُولَدْ");
        assert_eq!(engine.detect(&ayah), engine.detect(&ayah));
    }
}
