//! Unicode normalization with selectively protected diacritics.
//!
//! Normalization uppercases a word, strips accents from borrowed letters
//! (`é` → `E`) and drops everything outside the output alphabet. Letters that
//! are distinct in the target languages, such as `Å`, `Ä`, `Ö`, `Æ` and `Ø`,
//! are *protected*: they survive as themselves instead of being reduced to
//! their base Latin letter.
//!
//! # Algorithm
//!
//! ```text
//! uppercase
//! ascii only?  → keep A-Z and kept chars
//! otherwise    → protect → NFD
//!              → per cluster (starter + marks): compose protected letter,
//!                or restore placeholder, and drop the marks
//!              → keep A-Z, protected and kept chars
//! ```
//!
//! # Example
//!
//! ```rust
//! use phonoprint::normalize::{normalize, Normalizer};
//!
//! assert_eq!(normalize("José", None, None), "JOSE");
//!
//! let normalizer = Normalizer::scandinavian();
//! assert_eq!(normalizer.normalize("Åsa-Märta"), "ÅSAMÄRTA");
//! ```

pub mod protected;

use std::sync::Arc;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ConfigError, Result};

pub use protected::{is_placeholder, ProtectedCharMap};

/// Letters kept distinct by [`Normalizer::scandinavian`].
pub const SCANDINAVIAN_LETTERS: &[char] = &['Å', 'Ä', 'Ö', 'Æ', 'Ø'];

/// A reusable normalizer for one protected/kept configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    protected: Arc<ProtectedCharMap>,
    keep: Vec<char>,
}

impl Normalizer {
    /// Create a normalizer.
    ///
    /// `protected` characters survive decomposition as distinct letters;
    /// `keep` characters (typically punctuation such as `-`) are allowed in
    /// the output but receive no protection.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReservedCodepoint`] if either set contains a
    /// placeholder codepoint.
    pub fn new(protected: &[char], keep: &[char]) -> Result<Self> {
        let keep = protected::canonical_set(keep);
        if let Some(&c) = keep.iter().find(|&&c| is_placeholder(c)) {
            return Err(ConfigError::ReservedCodepoint(c));
        }

        Ok(Normalizer {
            protected: ProtectedCharMap::shared(protected)?,
            keep,
        })
    }

    /// Normalizer that protects `Å Ä Ö Æ Ø` and keeps nothing else.
    pub fn scandinavian() -> Self {
        Normalizer {
            protected: shared_or_empty(SCANDINAVIAN_LETTERS),
            keep: Vec::new(),
        }
    }

    /// The protected-character map.
    pub fn protected(&self) -> &ProtectedCharMap {
        &self.protected
    }

    /// The kept characters.
    pub fn keep(&self) -> &[char] {
        &self.keep
    }

    /// Normalize `word`.
    ///
    /// Never fails; a word with nothing in the output alphabet normalizes to
    /// the empty string. Protected letters survive whether they are typed
    /// precomposed, decomposed, or followed by further combining marks.
    pub fn normalize(&self, word: &str) -> String {
        let upper = word.to_uppercase();

        if upper.is_ascii() {
            return upper
                .chars()
                .filter(|&c| c.is_ascii_uppercase() || self.keep.contains(&c))
                .collect();
        }

        let map = &*self.protected;
        let decomposed: Vec<char> = upper
            .chars()
            .filter(|&c| !is_placeholder(c))
            .map(|c| map.protect(c))
            .nfd()
            .collect();

        let mut out = String::with_capacity(upper.len());
        let mut rest = decomposed.as_slice();
        while let Some((&c, tail)) = rest.split_first() {
            let marks_len = tail.iter().take_while(|&&m| is_combining_mark(m)).count();
            let (marks, next) = tail.split_at(marks_len);
            rest = next;

            // A mark with no starter before it.
            if is_combining_mark(c) {
                continue;
            }
            let c = map.compose(c, marks).unwrap_or_else(|| map.restore(c));
            if self.accepts(c) {
                out.push(c);
            }
        }
        out
    }

    #[inline]
    fn accepts(&self, c: char) -> bool {
        c.is_ascii_uppercase() || self.protected.contains(c) || self.keep.contains(&c)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::scandinavian()
    }
}

/// Shared map for `protected`, or a map protecting nothing if the set is
/// invalid. Callers that need the error use [`Normalizer::new`].
fn shared_or_empty(protected: &[char]) -> Arc<ProtectedCharMap> {
    ProtectedCharMap::shared(protected).unwrap_or_else(|err| {
        tracing::warn!(%err, "invalid protected set, protecting nothing");
        Arc::new(ProtectedCharMap::default())
    })
}

/// Normalize a single word.
///
/// Convenience wrapper around [`Normalizer`]. Characters in the placeholder
/// range are ignored in `protected_chars` and `keep_chars`, so this function
/// never fails.
pub fn normalize(
    word: &str,
    protected_chars: Option<&[char]>,
    keep_chars: Option<&[char]>,
) -> String {
    let sanitize = |chars: Option<&[char]>| -> Vec<char> {
        chars
            .unwrap_or_default()
            .iter()
            .copied()
            .filter(|&c| !is_placeholder(c))
            .collect()
    };
    let protected = sanitize(protected_chars);
    let keep = sanitize(keep_chars);

    Normalizer {
        protected: shared_or_empty(&protected),
        keep: protected::canonical_set(&keep),
    }
    .normalize(word)
}
