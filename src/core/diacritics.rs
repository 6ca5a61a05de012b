// File: src/core/diacritics.rs
use crate::core::types::{DiacriticMark, Letter};
use serde::{Deserialize, Serialize};

pub const FATHATAN: char = '\u{064b}';
pub const DAMMATAN: char = '\u{064c}';
pub const KASRATAN: char = '\u{064d}';
pub const FATHA: char = '\u{064e}';
pub const DAMMA: char = '\u{064f}';
pub const KASRA: char = '\u{0650}';
pub const SHADDA: char = '\u{0651}';
pub const SUKOON: char = '\u{0652}';
/// Uthmani script writes sukoon as a small high dotless head of khah.
pub const SMALL_HIGH_SUKOON: char = '\u{06e1}';

/// Code point -> mark lookup. Anything absent classifies as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkTable {
    entries: Vec<(char, DiacriticMark)>,
}

impl MarkTable {
    /// The eight marks of standard vocalised text.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                (FATHA, DiacriticMark::Fatha),
                (KASRA, DiacriticMark::Kasra),
                (DAMMA, DiacriticMark::Damma),
                (SHADDA, DiacriticMark::Shadda),
                (FATHATAN, DiacriticMark::TanweenFath),
                (KASRATAN, DiacriticMark::TanweenKasr),
                (DAMMATAN, DiacriticMark::TanweenDamm),
                (SUKOON, DiacriticMark::ExplicitSukoon),
            ],
        }
    }

    /// Standard marks plus the Uthmani sukoon glyph.
    pub fn uthmani() -> Self {
        let mut table = Self::standard();
        table.insert(SMALL_HIGH_SUKOON, DiacriticMark::ExplicitSukoon);
        table
    }

    pub fn insert(&mut self, c: char, mark: DiacriticMark) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == c) {
            Some(entry) => entry.1 = mark,
            None => self.entries.push((c, mark)),
        }
    }

    pub fn get(&self, c: char) -> Option<DiacriticMark> {
        self.entries.iter().find(|(existing, _)| *existing == c).map(|&(_, mark)| mark)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MarkTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Maps raw characters to diacritic categories and groups a word's code
/// points into letters.
#[derive(Debug, Clone)]
pub struct DiacriticClassifier {
    table: MarkTable,
}

impl DiacriticClassifier {
    pub fn new(table: MarkTable) -> Self {
        Self { table }
    }

    /// Never fails: unknown characters (small high marks, punctuation, base
    /// letters) come back as `None`.
    pub fn classify(&self, c: char) -> DiacriticMark {
        self.table.get(c).unwrap_or(DiacriticMark::None)
    }

    pub fn is_mark(&self, c: char) -> bool {
        self.table.get(c).is_some()
    }

    /// Arabic combining marks (nonspacing, category Mn), whether or not the
    /// table gives them a meaning.
    pub fn is_combining(c: char) -> bool {
        matches!(
            c,
            '\u{0610}'..='\u{061a}'
                | '\u{064b}'..='\u{065f}'
                | '\u{0670}'
                | '\u{06d6}'..='\u{06dc}'
                | '\u{06df}'..='\u{06e4}'
                | '\u{06e7}'..='\u{06e8}'
                | '\u{06ea}'..='\u{06ed}'
                | '\u{08d3}'..='\u{08e1}'
                | '\u{08e3}'..='\u{08ff}'
        )
    }

    /// Splits a word into letters. The first mark after a base letter becomes
    /// its `mark`; later marks, and combining marks the table does not know,
    /// only widen the letter.
    pub fn segment(&self, word: &str) -> Vec<Letter> {
        let mut letters: Vec<Letter> = Vec::new();

        for (offset, c) in word.chars().enumerate() {
            let mark = self.classify(c);
            if mark != DiacriticMark::None || Self::is_combining(c) {
                if let Some(letter) = letters.last_mut() {
                    if letter.width == 1 {
                        letter.mark = mark;
                    }
                    letter.width += 1;
                    continue;
                }
            }
            // Base letters, and a leading orphan mark, start a new letter.
            letters.push(Letter::bare(c, offset));
        }

        letters
    }
}

impl Default for DiacriticClassifier {
    fn default() -> Self {
        Self::new(MarkTable::standard())
    }
}
