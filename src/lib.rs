//! # phonoprint
//!
//! Phonetic fingerprints for Scandinavian (and English-influenced) personal
//! and place names.
//!
//! A fingerprint is a *set* of normalized spellings. Words that sound alike
//! despite different orthography end up with intersecting fingerprints, which
//! is the matching criterion.
//!
//! The pipeline has four stages:
//!
//! 1. [`normalize`](mod@normalize) - uppercase, strip accents from borrowed letters, keep
//!    protected letters such as `Å` and `Ø` distinct
//! 2. [`vowel_drop`] - optionally elide a weak medial vowel
//! 3. [`rules`] - expand under caller-supplied, ordered rewrite rules with
//!    branching alternatives
//! 4. [`postprocess`] - cap vowels, compress runs, truncate, fold letter classes
//!
//! [`fingerprint`](mod@fingerprint) composes them.
//!
//! ## Example
//!
//! ```rust
//! use phonoprint::prelude::*;
//!
//! let swedish = RuleTable::new(vec![
//!     Rule::new("CK", ["K"]).unwrap(),
//!     Rule::new("QU", ["KV"]).unwrap(),
//! ]);
//!
//! let fingerprinter = Fingerprinter::builder()
//!     .rule_table(swedish)
//!     .build()
//!     .unwrap();
//!
//! assert!(fingerprinter.matches("Pelle", "Pele"));
//! assert!(fingerprinter.matches("Berggren", "Bergren"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod postprocess;
pub mod rules;
pub mod vowel_drop;

pub use error::{ConfigError, Result};
pub use fingerprint::{fingerprint, Fingerprint, Fingerprinter, FingerprinterBuilder};
pub use normalize::normalize;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::alphabet::Alphabet;
    pub use crate::error::ConfigError;
    pub use crate::fingerprint::{fingerprint, Fingerprint, Fingerprinter, FingerprinterBuilder};
    pub use crate::normalize::{normalize, Normalizer, ProtectedCharMap};
    pub use crate::postprocess::{PostProcessOptions, PostProcessor};
    pub use crate::rules::{expand, Rule, RuleTable};
    pub use crate::vowel_drop::{expand_second_vowel, VowelDrop};
}
