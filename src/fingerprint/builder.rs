//! Builder pattern for creating Fingerprinter instances.
//!
//! The `FingerprinterBuilder` collects configuration with a fluent API and
//! validates it once, in [`FingerprinterBuilder::build`].

use crate::alphabet::Alphabet;
use crate::error::Result;
use crate::fingerprint::Fingerprinter;
use crate::normalize::{Normalizer, SCANDINAVIAN_LETTERS};
use crate::postprocess::{PostProcessOptions, PostProcessor};
use crate::rules::RuleTable;
use crate::vowel_drop::VowelDrop;

/// Builder for constructing a [`Fingerprinter`] with a fluent API.
///
/// Every setting has a default: the Scandinavian protected letters, no kept
/// characters, the default vowel-drop heuristic and alphabet, default
/// post-processing options and no rule tables (identity expansion).
///
/// # Example
///
/// ```rust
/// use phonoprint::fingerprint::Fingerprinter;
/// use phonoprint::postprocess::PostProcessOptions;
/// use phonoprint::rules::{Rule, RuleTable};
///
/// let fingerprinter = Fingerprinter::builder()
///     .keep_chars(&['-'])
///     .rule_table(RuleTable::new(vec![Rule::new("PH", ["F"]).unwrap()]))
///     .options(PostProcessOptions::default().max_vowels(3))
///     .build()?;
/// # Ok::<(), phonoprint::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FingerprinterBuilder {
    protected: Vec<char>,
    keep: Vec<char>,
    vowel_drop: VowelDrop,
    tables: Vec<RuleTable>,
    options: PostProcessOptions,
    alphabet: Alphabet,
}

impl Default for FingerprinterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FingerprinterBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        FingerprinterBuilder {
            protected: SCANDINAVIAN_LETTERS.to_vec(),
            keep: Vec::new(),
            vowel_drop: VowelDrop::default(),
            tables: Vec::new(),
            options: PostProcessOptions::default(),
            alphabet: Alphabet::default(),
        }
    }

    /// Set the characters protected from accent stripping.
    ///
    /// # Arguments
    ///
    /// * `chars` - Letters that must survive as distinct letters, e.g. `Å`
    pub fn protected_chars(mut self, chars: &[char]) -> Self {
        self.protected = chars.to_vec();
        self
    }

    /// Set extra characters allowed in normalized output.
    pub fn keep_chars(mut self, chars: &[char]) -> Self {
        self.keep = chars.to_vec();
        self
    }

    /// Set the vowel-drop heuristic.
    pub fn vowel_drop(mut self, vowel_drop: VowelDrop) -> Self {
        self.vowel_drop = vowel_drop;
        self
    }

    /// Append a rule table. Tables are applied independently and their
    /// results unioned.
    pub fn rule_table(mut self, table: RuleTable) -> Self {
        self.tables.push(table);
        self
    }

    /// Append several rule tables.
    pub fn rule_tables<I>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = RuleTable>,
    {
        self.tables.extend(tables);
        self
    }

    /// Set the post-processing options.
    pub fn options(mut self, options: PostProcessOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the alphabet used by the vowel-drop heuristic and the
    /// post-processor.
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    /// Build the fingerprinter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::ReservedCodepoint`] if a protected or
    /// kept character lies in the placeholder range, and
    /// [`crate::ConfigError::TooManyProtected`] if the protected set is
    /// larger than that range.
    pub fn build(self) -> Result<Fingerprinter> {
        let normalizer = Normalizer::new(&self.protected, &self.keep)?;
        tracing::debug!(
            protected = ?normalizer.protected().chars(),
            tables = self.tables.len(),
            "built fingerprinter"
        );

        Ok(Fingerprinter {
            normalizer,
            vowel_drop: self.vowel_drop,
            tables: self.tables,
            post: PostProcessor::new(self.options, self.alphabet),
        })
    }
}
