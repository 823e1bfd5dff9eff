//! The fingerprint pipeline.
//!
//! ```text
//! word → normalize → vowel drop → { variants }
//!      → for each variant, for each rule table: expand → { candidates }
//!      → post-process each candidate → union
//! ```
//!
//! Deduplication happens only here, after post-processing; the rule engine
//! hands over every production it generated.
//!
//! # Empty input
//!
//! A word that normalizes to the empty string has an empty fingerprint, and
//! candidates that post-process to the empty string are discarded. An empty
//! fingerprint therefore never matches anything, including another empty
//! fingerprint.
//!
//! # Example
//!
//! ```rust
//! use phonoprint::fingerprint::Fingerprinter;
//! use phonoprint::rules::{Rule, RuleTable};
//!
//! let fingerprinter = Fingerprinter::builder()
//!     .rule_table(RuleTable::new(vec![Rule::new("CK", ["K"]).unwrap()]))
//!     .build()
//!     .unwrap();
//!
//! assert!(fingerprinter.matches("Pelle", "Pele"));
//! ```

pub mod builder;

use std::collections::btree_set;
use std::collections::BTreeSet;

use crate::normalize::Normalizer;
use crate::postprocess::{PostProcessOptions, PostProcessor};
use crate::rules::{expand_chars, RuleTable};
use crate::vowel_drop::VowelDrop;

pub use builder::FingerprinterBuilder;

/// The set of phonetic codes of one word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    codes: BTreeSet<String>,
}

impl Fingerprint {
    /// The codes, in sorted order.
    pub fn codes(&self) -> &BTreeSet<String> {
        &self.codes
    }

    /// Iterate over the codes in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.codes.iter()
    }

    /// Returns the number of codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns true if there are no codes.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Returns true if `code` is one of the codes.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Returns true if the two fingerprints share a code.
    ///
    /// This is the matching criterion: two words sound alike when their
    /// fingerprints intersect.
    pub fn intersects(&self, other: &Fingerprint) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|code| large.codes.contains(code))
    }

    /// Unwrap into the underlying set.
    pub fn into_inner(self) -> BTreeSet<String> {
        self.codes
    }
}

impl FromIterator<String> for Fingerprint {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Fingerprint {
            codes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Fingerprint {
    type Item = String;
    type IntoIter = btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Fingerprint {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// A configured fingerprint pipeline.
///
/// Immutable after construction and safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    normalizer: Normalizer,
    vowel_drop: VowelDrop,
    tables: Vec<RuleTable>,
    post: PostProcessor,
}

impl Fingerprinter {
    /// Start building a fingerprinter.
    pub fn builder() -> FingerprinterBuilder {
        FingerprinterBuilder::new()
    }

    /// The normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The vowel-drop configuration.
    pub fn vowel_drop(&self) -> &VowelDrop {
        &self.vowel_drop
    }

    /// The rule tables, in the order they are applied.
    pub fn rule_tables(&self) -> &[RuleTable] {
        &self.tables
    }

    /// The post-processor.
    pub fn post_processor(&self) -> &PostProcessor {
        &self.post
    }

    /// Compute the fingerprint of `word`.
    ///
    /// Empty codes are discarded; see [`fingerprint()`](fn@fingerprint).
    pub fn fingerprint(&self, word: &str) -> Fingerprint {
        run(
            word,
            &self.normalizer,
            &self.vowel_drop,
            &self.tables,
            &self.post,
        )
    }

    /// Returns true if `a` and `b` have intersecting fingerprints.
    pub fn matches(&self, a: &str, b: &str) -> bool {
        self.fingerprint(a).intersects(&self.fingerprint(b))
    }
}

/// Compute the fingerprint of `word` with the default Scandinavian
/// normalizer, vowel-drop heuristic and alphabet.
///
/// Results are unioned across all `rule_tables`; an empty slice behaves like a
/// single empty table.
///
/// Empty codes are never part of a fingerprint. A word that normalizes to
/// nothing yields an empty set, and a candidate that post-processes to `""`
/// is dropped even when other candidates of the same word survive.
pub fn fingerprint(
    word: &str,
    rule_tables: &[RuleTable],
    options: &PostProcessOptions,
) -> Fingerprint {
    let post = PostProcessor::new(*options, Default::default());
    run(
        word,
        &Normalizer::scandinavian(),
        &VowelDrop::default(),
        rule_tables,
        &post,
    )
}

fn run(
    word: &str,
    normalizer: &Normalizer,
    vowel_drop: &VowelDrop,
    tables: &[RuleTable],
    post: &PostProcessor,
) -> Fingerprint {
    let normalized = normalizer.normalize(word);
    if normalized.is_empty() {
        tracing::debug!(word, "word normalized to nothing");
        return Fingerprint::default();
    }

    let identity = RuleTable::empty();
    let tables = if tables.is_empty() {
        std::slice::from_ref(&identity)
    } else {
        tables
    };

    let variants = vowel_drop.expand(&normalized, post.alphabet());
    let mut codes = BTreeSet::new();
    let mut candidates = 0;

    for variant in &variants {
        let chars: Vec<char> = variant.chars().collect();
        for table in tables {
            for candidate in expand_chars(&chars, table) {
                candidates += 1;
                let code = post.apply(&candidate);
                if !code.is_empty() {
                    codes.insert(code);
                }
            }
        }
    }

    tracing::debug!(
        word,
        normalized = normalized.as_str(),
        variants = variants.len(),
        candidates,
        codes = codes.len(),
        "fingerprinted word"
    );

    Fingerprint { codes }
}
