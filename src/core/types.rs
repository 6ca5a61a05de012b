// File: src/core/types.rs
use serde::{Deserialize, Serialize};

/// 1-based position of a word inside its ayah.
pub type WordIndex = usize;

/// Semantic category of the combining mark that follows a base letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiacriticMark {
    None,
    Fatha,
    Kasra,
    Damma,
    Shadda,
    TanweenFath,
    TanweenKasr,
    TanweenDamm,
    ExplicitSukoon,
}

impl DiacriticMark {
    /// True for marks that give the letter a vowel (shadda included, since a
    /// doubled letter always carries one).
    pub fn is_vowel_bearing(self) -> bool {
        matches!(
            self,
            DiacriticMark::Fatha
                | DiacriticMark::Kasra
                | DiacriticMark::Damma
                | DiacriticMark::Shadda
                | DiacriticMark::TanweenFath
                | DiacriticMark::TanweenKasr
                | DiacriticMark::TanweenDamm
        )
    }

    pub fn is_tanween(self) -> bool {
        matches!(
            self,
            DiacriticMark::TanweenFath | DiacriticMark::TanweenKasr | DiacriticMark::TanweenDamm
        )
    }
}

/// A base character together with the mark written immediately after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    pub base: char,
    pub mark: DiacriticMark,
    /// Code-point offset of `base` inside the word text.
    pub offset: usize,
    /// Number of code points this letter spans, base and every attached mark.
    pub width: usize,
}

impl Letter {
    pub fn bare(base: char, offset: usize) -> Self {
        Self { base, mark: DiacriticMark::None, offset, width: 1 }
    }
}

/// A whitespace-delimited word of an ayah. Identity is its rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    text: String,
    index: WordIndex,
    letters: Vec<Letter>,
}

impl Word {
    pub fn new(text: String, index: WordIndex, letters: Vec<Letter>) -> Self {
        Self { text, index, letters }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> WordIndex {
        self.index
    }

    pub fn letters(&self) -> &[Letter] {
        &self.letters
    }

    pub fn letter(&self, letter_index: usize) -> Option<&Letter> {
        self.letters.get(letter_index)
    }

    pub fn is_final_letter(&self, letter_index: usize) -> bool {
        letter_index + 1 == self.letters.len()
    }
}

/// A verse: the unit every rule is evaluated against. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ayah {
    surah_number: u32,
    ayah_number: u32,
    words: Vec<Word>,
}

impl Ayah {
    pub fn new(surah_number: u32, ayah_number: u32, words: Vec<Word>) -> Self {
        Self { surah_number, ayah_number, words }
    }

    pub fn surah_number(&self) -> u32 {
        self.surah_number
    }

    pub fn ayah_number(&self) -> u32 {
        self.ayah_number
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn last_word(&self) -> Option<&Word> {
        self.words.last()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The words joined back with single spaces.
    pub fn text(&self) -> String {
        self.words.iter().map(Word::text).collect::<Vec<_>>().join(" ")
    }
}

/// Strong (kubra) at the stopping point, light (sughra) mid-utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    #[serde(rename = "Qalqalah_Kubra")]
    Strong,
    #[serde(rename = "Qalqalah_Sughra")]
    Light,
}

impl Kind {
    /// The exported rule label.
    pub fn label(self) -> &'static str {
        match self {
            Kind::Strong => "Qalqalah_Kubra",
            Kind::Light => "Qalqalah_Sughra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

/// One detected rule trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QalqalahInstance {
    #[serde(rename = "word")]
    pub word_text: String,
    #[serde(rename = "word_position")]
    pub word_index: WordIndex,
    pub letter: char,
    /// Position among the word's letters, marks not counted.
    pub letter_index: usize,
    /// Code-point offset of the letter inside the word text.
    #[serde(rename = "letter_position")]
    pub char_offset: usize,
    #[serde(rename = "type")]
    pub kind: Kind,
    pub confidence: Confidence,
    #[serde(rename = "reason")]
    pub justification: String,
    pub ayah_end: bool,
}
