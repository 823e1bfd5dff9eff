//! Letter classes shared by the vowel-drop expander and the post-processor.
//!
//! An [`Alphabet`] is plain configuration data: which letters count as vowels,
//! which vowels are weak enough to be elided, and how consonants and vowels
//! fold onto representative letters. [`Alphabet::default`] is tuned for
//! Scandinavian names with English spellings mixed in.

use rustc_hash::FxHashMap;

/// Vowels of English and the Scandinavian languages.
pub const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U', 'Y', 'Å', 'Ä', 'Ö', 'Æ', 'Ø', 'Ü'];

/// Vowels eligible for medial elision.
pub const WEAK_VOWELS: &[char] = &['A', 'E', 'O'];

/// Voiced/voiceless pairs and near-homophones, folded onto one letter.
const CONSONANT_FOLDS: &[(char, char)] = &[
    ('B', 'P'),
    ('D', 'T'),
    ('G', 'K'),
    ('C', 'K'),
    ('Q', 'K'),
    ('V', 'F'),
    ('W', 'F'),
    ('Z', 'S'),
];

/// Consonants that carry no distinguishing sound in this scheme.
const SILENT_CONSONANTS: &[char] = &['H'];

const VOWEL_FOLDS: &[(char, char)] = &[
    ('Ä', 'E'),
    ('Æ', 'E'),
    ('Ø', 'Ö'),
    ('Y', 'I'),
    ('Å', 'O'),
    ('Ü', 'U'),
];

/// Letter classes and fold tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    vowels: Vec<char>,
    weak_vowels: Vec<char>,
    consonant_folds: FxHashMap<char, char>,
    silent_consonants: Vec<char>,
    vowel_folds: FxHashMap<char, char>,
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet {
            vowels: VOWELS.to_vec(),
            weak_vowels: WEAK_VOWELS.to_vec(),
            consonant_folds: CONSONANT_FOLDS.iter().copied().collect(),
            silent_consonants: SILENT_CONSONANTS.to_vec(),
            vowel_folds: VOWEL_FOLDS.iter().copied().collect(),
        }
    }
}

impl Alphabet {
    /// Create an alphabet from explicit letter classes and fold tables.
    ///
    /// Letters are compared after normalization, so all of them should be
    /// uppercase.
    pub fn new<V, W, C, S, F>(
        vowels: V,
        weak_vowels: W,
        consonant_folds: C,
        silent_consonants: S,
        vowel_folds: F,
    ) -> Self
    where
        V: IntoIterator<Item = char>,
        W: IntoIterator<Item = char>,
        C: IntoIterator<Item = (char, char)>,
        S: IntoIterator<Item = char>,
        F: IntoIterator<Item = (char, char)>,
    {
        Alphabet {
            vowels: vowels.into_iter().collect(),
            weak_vowels: weak_vowels.into_iter().collect(),
            consonant_folds: consonant_folds.into_iter().collect(),
            silent_consonants: silent_consonants.into_iter().collect(),
            vowel_folds: vowel_folds.into_iter().collect(),
        }
    }

    /// The vowel letters.
    pub fn vowels(&self) -> &[char] {
        &self.vowels
    }

    /// Returns true if `c` is a vowel.
    #[inline]
    pub fn is_vowel(&self, c: char) -> bool {
        self.vowels.contains(&c)
    }

    /// Returns true if `c` may be elided by the vowel-drop expander.
    #[inline]
    pub fn is_weak_vowel(&self, c: char) -> bool {
        self.weak_vowels.contains(&c)
    }

    /// Returns true if `c` is a letter that is not a vowel.
    #[inline]
    pub fn is_consonant(&self, c: char) -> bool {
        c.is_alphabetic() && !self.is_vowel(c)
    }

    /// Fold a consonant onto its representative.
    ///
    /// Returns `None` for silent consonants, which are dropped.
    #[inline]
    pub fn fold_consonant(&self, c: char) -> Option<char> {
        if self.silent_consonants.contains(&c) {
            None
        } else {
            Some(self.consonant_folds.get(&c).copied().unwrap_or(c))
        }
    }

    /// Fold a vowel onto its representative.
    #[inline]
    pub fn fold_vowel(&self, c: char) -> char {
        self.vowel_folds.get(&c).copied().unwrap_or(c)
    }
}
