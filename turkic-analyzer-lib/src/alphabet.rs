// Language alphabet: case mapping and word extraction.
//
// Case mapping is table driven rather than Unicode driven, so Turkic pairs
// such as i/İ and ı/I come out right regardless of locale.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::LexiconError;
use crate::lexicon::Lexicon;
use crate::types::AlphaLetter;

/// The hyphen joins compound words and maps to itself.
const HYPHEN: AlphaLetter = AlphaLetter {
    lower: '-',
    upper: '-',
};

/// Letter table of one language.
#[derive(Debug, Clone)]
pub struct Alphabet {
    letters: Vec<AlphaLetter>,
    to_lower: HashMap<char, char>,
    to_upper: HashMap<char, char>,
}

impl Alphabet {
    /// Build an alphabet from letters in display order. The hyphen is appended.
    pub fn new(letters: impl IntoIterator<Item = AlphaLetter>) -> Self {
        let mut letters: Vec<AlphaLetter> = letters.into_iter().collect();
        letters.push(HYPHEN);

        let mut to_lower = HashMap::new();
        let mut to_upper = HashMap::new();
        // When a char appears in two letters, the earlier letter wins.
        for letter in &letters {
            to_lower.entry(letter.upper).or_insert(letter.lower);
            to_upper.entry(letter.lower).or_insert(letter.upper);
        }

        Self {
            letters,
            to_lower,
            to_upper,
        }
    }

    /// Build the alphabet stored in a lexicon's `alpha_letter` table.
    pub fn from_lexicon(lexicon: &dyn Lexicon) -> Result<Self, LexiconError> {
        Ok(Self::new(lexicon.alpha_letters()?))
    }

    pub fn letters(&self) -> &[AlphaLetter] {
        &self.letters
    }

    /// True if `c` is the lower or upper form of some letter.
    pub fn contains(&self, c: char) -> bool {
        self.to_lower.contains_key(&c) || self.to_upper.contains_key(&c)
    }

    pub fn lower(&self, word: &str) -> String {
        word.chars()
            .map(|c| self.to_lower.get(&c).copied().unwrap_or(c))
            .collect()
    }

    pub fn upper(&self, word: &str) -> String {
        word.chars()
            .map(|c| self.to_upper.get(&c).copied().unwrap_or(c))
            .collect()
    }

    /// Split text into maximal runs of alphabet characters, in either case.
    /// Everything else is a separator and is dropped.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();

        for c in text.nfc() {
            if self.contains(c) {
                current.push(c);
            } else if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }

        tokens
    }
}
