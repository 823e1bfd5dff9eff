//! Medial weak-vowel elision.
//!
//! Casual and dialectal pronunciation often swallows an unstressed vowel right
//! after the first consonant ("Pelle" is heard close to "Plle"). The expander
//! produces the word itself and, when the heuristic applies, a second base
//! variant with that vowel removed.
//!
//! The heuristic leaves a word alone when
//!
//! - it is shorter than [`MIN_WORD_LEN`] letters,
//! - it contains a protected consonant cluster (`SKJ`, `STJ`, `SCH`, `SJ`,
//!   `KJ`, `TJ`), whose sound depends on the letters around it,
//! - it has fewer vowels than the configured minimum,
//! - the letter at [`CANDIDATE_INDEX`] is not a weak vowel between two
//!   consonants,
//! - or the letters after that vowel start a protected suffix.

use smallvec::{smallvec, SmallVec};

use crate::alphabet::Alphabet;

/// Words shorter than this are never expanded.
pub const MIN_WORD_LEN: usize = 3;

/// Position of the vowel considered for elision: the word's second letter.
pub const CANDIDATE_INDEX: usize = 1;

/// Clusters that must not be disturbed by elision.
pub const PROTECTED_CLUSTERS: &[&str] = &["SKJ", "STJ", "SCH", "SJ", "KJ", "TJ"];

/// Name endings that must not be glued onto the preceding consonant.
pub const PROTECTED_SUFFIXES: &[&str] = &[
    "SON", "SEN", "SSON", "SSEN", "BERG", "BORG", "LUND", "STRÖM", "GREN", "QVIST", "DAHL",
    "DAL", "HOLM", "MAN", "MANN",
];

/// Base variants of one word: the word first, then the elided form if any.
pub type Variants = SmallVec<[String; 2]>;

/// Configuration of the vowel-drop heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VowelDrop {
    enabled: bool,
    min_vowels: usize,
    clusters: Vec<String>,
    suffixes: Vec<String>,
}

impl Default for VowelDrop {
    fn default() -> Self {
        VowelDrop {
            enabled: true,
            min_vowels: 2,
            clusters: PROTECTED_CLUSTERS.iter().map(|s| s.to_string()).collect(),
            suffixes: PROTECTED_SUFFIXES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl VowelDrop {
    /// Configuration that never elides anything.
    pub fn disabled() -> Self {
        VowelDrop {
            enabled: false,
            ..Self::default()
        }
    }

    /// Enable or disable elision.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Minimum number of vowels a word needs before a vowel may be dropped.
    pub fn min_vowels(mut self, min_vowels: usize) -> Self {
        self.min_vowels = min_vowels;
        self
    }

    /// Replace the protected consonant clusters.
    pub fn clusters<I, S>(mut self, clusters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clusters = clusters.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the protected suffixes.
    pub fn suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if elision is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Produce the base variants of a normalized word.
    pub fn expand(&self, word: &str, alphabet: &Alphabet) -> Variants {
        match self.elision_point(word, alphabet) {
            Some(byte_pos) => {
                let mut dropped = String::with_capacity(word.len());
                dropped.push_str(&word[..byte_pos]);
                let rest = &word[byte_pos..];
                let mut rest_chars = rest.chars();
                rest_chars.next();
                dropped.push_str(rest_chars.as_str());
                smallvec![word.to_string(), dropped]
            }
            None => smallvec![word.to_string()],
        }
    }

    /// Byte offset of the vowel to drop, if the heuristic applies.
    fn elision_point(&self, word: &str, alphabet: &Alphabet) -> Option<usize> {
        if !self.enabled {
            return None;
        }

        let chars: Vec<(usize, char)> = word.char_indices().collect();
        if chars.len() < MIN_WORD_LEN {
            return None;
        }
        if self.clusters.iter().any(|cluster| word.contains(cluster.as_str())) {
            return None;
        }

        let vowel_count = chars.iter().filter(|&&(_, c)| alphabet.is_vowel(c)).count();
        if vowel_count < self.min_vowels {
            return None;
        }

        let (byte_pos, candidate) = *chars.get(CANDIDATE_INDEX)?;
        let (_, before) = chars[CANDIDATE_INDEX - 1];
        let &(after_pos, after) = chars.get(CANDIDATE_INDEX + 1)?;

        if !alphabet.is_weak_vowel(candidate)
            || !alphabet.is_consonant(before)
            || !alphabet.is_consonant(after)
        {
            return None;
        }

        let rest = &word[after_pos..];
        if self.suffixes.iter().any(|suffix| rest.starts_with(suffix.as_str())) {
            return None;
        }

        Some(byte_pos)
    }
}

/// Expand `word` with the default configuration and alphabet.
pub fn expand_second_vowel(word: &str) -> Variants {
    VowelDrop::default().expand(word, &Alphabet::default())
}
