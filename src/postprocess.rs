//! Canonicalization of rule-engine candidates.
//!
//! Every candidate runs through the same fixed pipeline:
//!
//! 1. [`cap_vowels`] - keep at most `max_vowels` vowels
//! 2. [`compress_runs`] - collapse runs of identical characters
//! 3. [`truncate`] - keep `head_length` leading and `tail_length` trailing
//!    characters
//! 4. [`fold_consonants`] - merge similar consonants, drop silent ones
//! 5. [`fold_vowels`] - merge similar vowels
//! 6. [`compress_runs`] - folding can create new runs
//!
//! Steps 4 and 5 can be switched off through [`PostProcessOptions`].

use crate::alphabet::Alphabet;
use crate::error::{ConfigError, Result};

/// Options of the post-processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PostProcessConfig", into = "PostProcessConfig")
)]
pub struct PostProcessOptions {
    /// Maximum number of vowels kept
    pub max_vowels: usize,
    /// Number of leading characters kept by truncation
    pub head_length: usize,
    /// Number of trailing characters kept by truncation
    pub tail_length: usize,
    /// Merge similar consonants and drop silent ones
    pub fold_consonants: bool,
    /// Merge similar vowels
    pub fold_vowels: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        PostProcessOptions {
            max_vowels: 2,
            head_length: 3,
            tail_length: 3,
            fold_consonants: true,
            fold_vowels: true,
        }
    }
}

impl PostProcessOptions {
    /// Set the vowel quota.
    pub fn max_vowels(mut self, max_vowels: usize) -> Self {
        self.max_vowels = max_vowels;
        self
    }

    /// Set the head and tail lengths used by truncation.
    pub fn truncation(mut self, head_length: usize, tail_length: usize) -> Self {
        self.head_length = head_length;
        self.tail_length = tail_length;
        self
    }

    /// Enable or disable consonant folding.
    pub fn fold_consonants(mut self, enabled: bool) -> Self {
        self.fold_consonants = enabled;
        self
    }

    /// Enable or disable vowel folding.
    pub fn fold_vowels(mut self, enabled: bool) -> Self {
        self.fold_vowels = enabled;
        self
    }
}

/// Post-processing options as they arrive from external configuration.
///
/// Numbers are signed so that negative values can be reported instead of
/// silently wrapping. Convert with `PostProcessOptions::try_from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PostProcessConfig {
    /// See [`PostProcessOptions::max_vowels`]
    pub max_vowels: i64,
    /// See [`PostProcessOptions::head_length`]
    pub head_length: i64,
    /// See [`PostProcessOptions::tail_length`]
    pub tail_length: i64,
    /// See [`PostProcessOptions::fold_consonants`]
    pub fold_consonants: bool,
    /// See [`PostProcessOptions::fold_vowels`]
    pub fold_vowels: bool,
}

impl Default for PostProcessConfig {
    fn default() -> Self {
        PostProcessOptions::default().into()
    }
}

impl TryFrom<PostProcessConfig> for PostProcessOptions {
    type Error = ConfigError;

    fn try_from(config: PostProcessConfig) -> Result<Self> {
        let unsigned = |field: &'static str, value: i64| {
            usize::try_from(value).map_err(|_| ConfigError::Negative { field, value })
        };

        Ok(PostProcessOptions {
            max_vowels: unsigned("max_vowels", config.max_vowels)?,
            head_length: unsigned("head_length", config.head_length)?,
            tail_length: unsigned("tail_length", config.tail_length)?,
            fold_consonants: config.fold_consonants,
            fold_vowels: config.fold_vowels,
        })
    }
}

impl From<PostProcessOptions> for PostProcessConfig {
    fn from(options: PostProcessOptions) -> Self {
        let signed = |value: usize| i64::try_from(value).unwrap_or(i64::MAX);
        PostProcessConfig {
            max_vowels: signed(options.max_vowels),
            head_length: signed(options.head_length),
            tail_length: signed(options.tail_length),
            fold_consonants: options.fold_consonants,
            fold_vowels: options.fold_vowels,
        }
    }
}

/// The post-processing pipeline bound to an alphabet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessor {
    options: PostProcessOptions,
    alphabet: Alphabet,
}

impl PostProcessor {
    /// Create a post-processor.
    pub fn new(options: PostProcessOptions, alphabet: Alphabet) -> Self {
        PostProcessor { options, alphabet }
    }

    /// The options.
    pub fn options(&self) -> &PostProcessOptions {
        &self.options
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Run the full pipeline on one candidate.
    pub fn apply(&self, candidate: &str) -> String {
        let opts = &self.options;

        let mut code = cap_vowels(candidate, opts.max_vowels, &self.alphabet);
        code = compress_runs(&code);
        code = truncate(&code, opts.head_length, opts.tail_length);
        if opts.fold_consonants {
            code = fold_consonants(&code, &self.alphabet);
        }
        if opts.fold_vowels {
            code = fold_vowels(&code, &self.alphabet);
        }
        compress_runs(&code)
    }
}

/// Keep the first `max_vowels` vowels and every non-vowel, in order.
pub fn cap_vowels(s: &str, max_vowels: usize, alphabet: &Alphabet) -> String {
    let mut seen = 0;
    s.chars()
        .filter(|&c| {
            if !alphabet.is_vowel(c) {
                return true;
            }
            seen += 1;
            seen <= max_vowels
        })
        .collect()
}

/// Collapse every run of identical consecutive characters to one.
pub fn compress_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut last = None;
    for c in s.chars() {
        if last != Some(c) {
            out.push(c);
            last = Some(c);
        }
    }
    out
}

/// Keep the first `head_length` and the last `tail_length` characters.
///
/// Strings no longer than `head_length` are returned unchanged. The tail
/// never overlaps the head: when the two would overlap, the tail starts
/// right after the head.
pub fn truncate(s: &str, head_length: usize, tail_length: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    if len <= head_length {
        return s.to_string();
    }

    let tail_start = len.saturating_sub(tail_length).max(head_length);
    chars[..head_length]
        .iter()
        .chain(&chars[tail_start..])
        .collect()
}

/// Fold consonants onto their representatives and drop silent ones.
pub fn fold_consonants(s: &str, alphabet: &Alphabet) -> String {
    s.chars()
        .filter_map(|c| {
            if alphabet.is_vowel(c) {
                Some(c)
            } else {
                alphabet.fold_consonant(c)
            }
        })
        .collect()
}

/// Fold vowels onto their representatives.
pub fn fold_vowels(s: &str, alphabet: &Alphabet) -> String {
    s.chars()
        .map(|c| {
            if alphabet.is_vowel(c) {
                alphabet.fold_vowel(c)
            } else {
                c
            }
        })
        .collect()
}
