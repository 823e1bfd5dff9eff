//! Branching rule application.
//!
//! A single left-to-right scan over the input. At each position the first
//! applicable rule of the table fires; its outputs are appended to every live
//! production, so a rule with `k` alternatives multiplies the number of
//! productions by `k`. Positions where no rule fires copy the input character.
//!
//! # Algorithm
//!
//! ```text
//! productions = [""]
//! i = 0
//! while i < len:
//!   rule = first rule in table applicable at i
//!   if rule:
//!     productions = [p + o for p in productions for o in rule.outputs]
//!     i += rule.pattern.len
//!   else:
//!     productions = [p + s[i] for p in productions]
//!     i += 1
//! ```
//!
//! Productions are never deduplicated during the scan. Rule tables are tuned
//! against the full cross product, and the fingerprint pipeline deduplicates
//! once at the very end. Growth is therefore exponential in the number of
//! branching match events; [`RuleTable::max_branching`] gives the per-event
//! bound.

use super::matching::find_rule_at;
use super::types::RuleTable;

/// Expand `word` under `table`.
///
/// Returns every production in generation order, duplicates included. The
/// result is never empty: an empty table or a word without matches yields
/// `[word]`.
///
/// # Examples
///
/// ```rust
/// use phonoprint::rules::{expand, Rule, RuleTable};
///
/// let table = RuleTable::new(vec![Rule::new("C", ["K", "S"]).unwrap()]);
/// assert_eq!(expand("CARL", &table), vec!["KARL", "SARL"]);
/// ```
pub fn expand(word: &str, table: &RuleTable) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    expand_chars(&chars, table)
}

/// Expand a word given as characters. See [`expand`].
pub fn expand_chars(s: &[char], table: &RuleTable) -> Vec<String> {
    let mut productions = vec![String::with_capacity(s.len())];
    let mut pos = 0;

    while pos < s.len() {
        match find_rule_at(table, s, pos) {
            Some(rule) => {
                let outputs = rule.outputs();
                if let [output] = outputs {
                    for production in &mut productions {
                        production.push_str(output);
                    }
                } else {
                    tracing::trace!(
                        pos,
                        alternatives = outputs.len(),
                        live = productions.len(),
                        "branching rule fired"
                    );
                    productions = productions
                        .iter()
                        .flat_map(|production| {
                            outputs.iter().map(move |output| {
                                let mut next = production.clone();
                                next.push_str(output);
                                next
                            })
                        })
                        .collect();
                }
                pos += rule.pattern().len();
            }
            None => {
                for production in &mut productions {
                    production.push(s[pos]);
                }
                pos += 1;
            }
        }
    }

    productions
}
