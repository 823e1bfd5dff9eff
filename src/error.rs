//! Error types for fingerprint configuration.
//!
//! The pipeline itself is total: normalizing, expanding and post-processing a
//! word never fails. Everything that can go wrong is a configuration mistake,
//! and it is reported when the configuration is constructed.

use thiserror::Error;

/// Errors raised while building rule tables, normalizers or options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A rule has an empty pattern.
    ///
    /// An empty pattern would match at every position without consuming
    /// input, so the scan could never advance.
    #[error("Rule pattern is empty")]
    EmptyPattern,

    /// A rule has no output alternatives.
    ///
    /// Deletion is expressed with a single empty output, not with an empty
    /// list.
    #[error("Rule for pattern {pattern:?} has no outputs")]
    NoOutputs {
        /// Pattern of the offending rule
        pattern: String,
    },

    /// A protected or kept character lies in the placeholder range used by
    /// the protected-character map.
    #[error("Character {0:?} is reserved for placeholders")]
    ReservedCodepoint(char),

    /// More characters were protected than there are placeholders.
    #[error("Cannot protect {count} characters (at most {max})")]
    TooManyProtected {
        /// Number of distinct protected characters requested
        count: usize,
        /// Size of the placeholder range
        max: usize,
    },

    /// A numeric option was negative.
    #[error("Option `{field}` must not be negative (got {value})")]
    Negative {
        /// Name of the option
        field: &'static str,
        /// Value that was supplied
        value: i64,
    },

    /// Configuration data could not be parsed.
    #[cfg(feature = "serialization")]
    #[error("Invalid configuration JSON")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
