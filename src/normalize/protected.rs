//! Bijective side-table between protected characters and placeholders.
//!
//! Canonical decomposition has no notion of "keep these letters atomic", so
//! protected characters are swapped for Private Use Area codepoints before
//! decomposition and swapped back afterwards. Placeholders are not marks and
//! have no decomposition, so NFD and mark stripping leave them alone.
//!
//! Input can also spell a protected letter as a base letter followed by
//! combining marks. [`ProtectedCharMap::compose`] recognizes such clusters
//! after decomposition.

use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ConfigError, Result};

/// First codepoint of the Basic Multilingual Plane Private Use Area.
pub const PLACEHOLDER_START: char = '\u{E000}';

/// Last codepoint of the Basic Multilingual Plane Private Use Area.
pub const PLACEHOLDER_END: char = '\u{F8FF}';

/// Number of available placeholders.
pub const PLACEHOLDER_COUNT: usize =
    (PLACEHOLDER_END as u32 - PLACEHOLDER_START as u32 + 1) as usize;

/// Returns true if `c` lies in the placeholder range.
#[inline]
pub fn is_placeholder(c: char) -> bool {
    (PLACEHOLDER_START..=PLACEHOLDER_END).contains(&c)
}

/// Immutable mapping from protected characters to placeholders and back.
///
/// The default map protects nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedCharMap {
    chars: Vec<char>,
    to_placeholder: FxHashMap<char, char>,
    from_placeholder: FxHashMap<char, char>,
    // base letter -> (canonical marks, protected char), most marks first
    composites: FxHashMap<char, Vec<(Vec<char>, char)>>,
}

impl ProtectedCharMap {
    /// Build a map for `protected`.
    ///
    /// Characters are uppercased (when they have a single-character uppercase
    /// form) and deduplicated; the resulting set is sorted so equal sets
    /// always produce identical maps.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReservedCodepoint`] if a character lies in the
    /// placeholder range, and [`ConfigError::TooManyProtected`] if the set is
    /// larger than the range.
    pub fn new(protected: &[char]) -> Result<Self> {
        let chars = canonical_set(protected);
        if let Some(&c) = chars.iter().find(|&&c| is_placeholder(c)) {
            return Err(ConfigError::ReservedCodepoint(c));
        }
        if chars.len() > PLACEHOLDER_COUNT {
            return Err(ConfigError::TooManyProtected {
                count: chars.len(),
                max: PLACEHOLDER_COUNT,
            });
        }

        let mut to_placeholder = FxHashMap::default();
        let mut from_placeholder = FxHashMap::default();
        for (offset, &c) in (PLACEHOLDER_START as u32..).zip(chars.iter()) {
            let Some(placeholder) = char::from_u32(offset) else {
                break;
            };
            to_placeholder.insert(c, placeholder);
            from_placeholder.insert(placeholder, c);
        }

        let mut composites: FxHashMap<char, Vec<(Vec<char>, char)>> = FxHashMap::default();
        for &c in &chars {
            let decomposed: Vec<char> = std::iter::once(c).nfd().collect();
            if let [base, marks @ ..] = decomposed.as_slice() {
                if !marks.is_empty() {
                    composites.entry(*base).or_default().push((marks.to_vec(), c));
                }
            }
        }
        for candidates in composites.values_mut() {
            candidates.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        }

        Ok(ProtectedCharMap {
            chars,
            to_placeholder,
            from_placeholder,
            composites,
        })
    }

    /// Fetch the shared map for `protected`, building it on first use.
    ///
    /// Maps are cached process-wide by their canonical character set.
    pub fn shared(protected: &[char]) -> Result<Arc<Self>> {
        let key = canonical_set(protected);
        if let Some(map) = CACHE.read().get(&key) {
            return Ok(Arc::clone(map));
        }

        let map = Arc::new(Self::new(&key)?);
        tracing::trace!(chars = ?key, "built protected-character map");
        let mut cache = CACHE.write();
        Ok(Arc::clone(cache.entry(key).or_insert(map)))
    }

    /// The protected characters, uppercased and sorted.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Returns true if `c` is protected.
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.to_placeholder.contains_key(&c)
    }

    /// Returns the number of protected characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns true if nothing is protected.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Replace a protected character with its placeholder.
    #[inline]
    pub fn protect(&self, c: char) -> char {
        self.to_placeholder.get(&c).copied().unwrap_or(c)
    }

    /// Replace a placeholder with its protected character.
    #[inline]
    pub fn restore(&self, c: char) -> char {
        self.from_placeholder.get(&c).copied().unwrap_or(c)
    }

    /// Recognize a decomposed cluster as a protected character.
    ///
    /// `base` is a starter and `marks` the combining marks following it, in
    /// canonical order. Returns the protected character `p` such that `p`
    /// followed by some further marks is canonically equivalent to the
    /// cluster. When several qualify, the one with the most marks wins, so
    /// `A + U+030A + U+0301` is `Å` with a stray acute.
    pub fn compose(&self, base: char, marks: &[char]) -> Option<char> {
        self.composites
            .get(&base)?
            .iter()
            .find(|(required, _)| leads_with(marks, required))
            .map(|&(_, c)| c)
    }
}

/// Returns true if `marks` is canonically equivalent to `prefix` followed by
/// the remaining marks.
///
/// Marks of different combining classes commute, so each mark of `prefix`
/// only has to be the first remaining mark of its own class.
fn leads_with(marks: &[char], prefix: &[char]) -> bool {
    let mut rest: SmallVec<[char; 4]> = SmallVec::from_slice(marks);
    for &mark in prefix {
        let class = canonical_combining_class(mark);
        match rest
            .iter()
            .position(|&m| canonical_combining_class(m) == class)
        {
            Some(i) if rest[i] == mark => {
                rest.remove(i);
            }
            _ => return false,
        }
    }
    true
}

static CACHE: LazyLock<RwLock<FxHashMap<Vec<char>, Arc<ProtectedCharMap>>>> =
    LazyLock::new(|| RwLock::new(FxHashMap::default()));

/// Uppercase, sort and deduplicate a character set.
pub(crate) fn canonical_set(chars: &[char]) -> Vec<char> {
    let mut set: Vec<char> = chars.iter().map(|&c| upper(c)).collect();
    set.sort_unstable();
    set.dedup();
    set
}

/// Single-character uppercase form of `c`, or `c` itself.
pub(crate) fn upper(c: char) -> char {
    let mut it = c.to_uppercase();
    match (it.next(), it.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
