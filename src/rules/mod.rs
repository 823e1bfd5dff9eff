//! Ordered, branching rewrite rules.
//!
//! Rule tables are configuration data supplied by the caller: the engine
//! never owns or mutates them. A table is an ordered list of
//! `pattern → outputs` rules with optional start/end constraints; the first
//! rule applicable at a position wins, regardless of pattern length.
//!
//! # Usage
//!
//! ```rust
//! use phonoprint::rules::{expand, Rule, RuleTable};
//!
//! let table = RuleTable::new(vec![
//!     Rule::new("SCH", ["SJ"]).unwrap().at_start(true),
//!     Rule::new("DT", ["T"]).unwrap(),
//!     Rule::new("I", ["I", "Y"]).unwrap(),
//! ]);
//!
//! assert_eq!(expand("SCHMIDT", &table), vec!["SJMIT", "SJMYT"]);
//! ```

pub mod application;
pub mod matching;
pub mod types;

pub use application::{expand, expand_chars};
pub use matching::{can_apply_at, constraint_holds, find_rule_at, pattern_matches_at};
pub use types::{Outputs, Rule, RuleTable};
