//! Type definitions for rewrite rules and rule tables.
//!
//! A [`Rule`] rewrites a literal character pattern into one or more output
//! alternatives. A [`RuleTable`] is an ordered list of rules in which earlier
//! rules take priority over later ones.
//!
//! Both types are validated on construction, so an engine run never has to
//! deal with an empty pattern or a rule without outputs.

use smallvec::SmallVec;

use super::matching;
use crate::error::{ConfigError, Result};

/// Output alternatives of one rule. Most rules have one or two.
pub type Outputs = SmallVec<[String; 2]>;

/// A rewrite rule.
///
/// # Fields
///
/// - `pattern` - Characters to match, compared case-exactly
/// - `outputs` - Replacement alternatives; an empty string deletes the match
/// - `at_start` - `Some(true)`: only at the start of the word;
///   `Some(false)`: never at the start; `None`: anywhere
/// - `at_end` - Same as `at_start`, checked against the end of the match
///
/// # Example
///
/// ```rust
/// use phonoprint::rules::Rule;
///
/// let rule = Rule::new("CH", ["K", "SJ"]).unwrap().at_start(true);
/// assert_eq!(rule.outputs().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RuleRecord", into = "RuleRecord")
)]
pub struct Rule {
    pattern: Vec<char>,
    outputs: Outputs,
    at_start: Option<bool>,
    at_end: Option<bool>,
}

impl Rule {
    /// Create an unconstrained rule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPattern`] for an empty pattern and
    /// [`ConfigError::NoOutputs`] when `outputs` yields nothing.
    pub fn new<I, S>(pattern: &str, outputs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        let outputs: Outputs = outputs.into_iter().map(Into::into).collect();
        if outputs.is_empty() {
            return Err(ConfigError::NoOutputs {
                pattern: pattern.to_string(),
            });
        }

        Ok(Rule {
            pattern: pattern.chars().collect(),
            outputs,
            at_start: None,
            at_end: None,
        })
    }

    /// Require (`true`) or forbid (`false`) a match at the start of the word.
    pub fn at_start(mut self, at_start: bool) -> Self {
        self.at_start = Some(at_start);
        self
    }

    /// Require (`true`) or forbid (`false`) a match ending at the end of the
    /// word.
    pub fn at_end(mut self, at_end: bool) -> Self {
        self.at_end = Some(at_end);
        self
    }

    /// The pattern.
    pub fn pattern(&self) -> &[char] {
        &self.pattern
    }

    /// The output alternatives, in order.
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// The start-of-word constraint.
    pub fn start_constraint(&self) -> Option<bool> {
        self.at_start
    }

    /// The end-of-word constraint.
    pub fn end_constraint(&self) -> Option<bool> {
        self.at_end
    }

    /// Returns true if this rule fires on `s` at `pos`.
    ///
    /// See [`matching::can_apply_at`].
    pub fn can_apply_at(&self, s: &[char], pos: usize) -> bool {
        matching::can_apply_at(self, s, pos)
    }
}

/// An ordered list of rules. Earlier rules win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table from rules in priority order.
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    /// A table without rules; expansion is the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a table from JSON.
    ///
    /// The expected shape is a list of records:
    ///
    /// ```json
    /// [
    ///   { "pattern": "PH", "outputs": "F" },
    ///   { "pattern": "CH", "outputs": ["K", "SJ"], "at_start": true }
    /// ]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON and for records that
    /// fail rule validation.
    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The rules, in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterate over the rules in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rule that fires on `s` at `pos`, if any.
    ///
    /// See [`matching::find_rule_at`].
    pub fn find_match(&self, s: &[char], pos: usize) -> Option<&Rule> {
        matching::find_rule_at(self, s, pos)
    }

    /// Largest number of output alternatives of any rule.
    ///
    /// A word with `n` match events can produce up to
    /// `max_branching().pow(n)` productions.
    pub fn max_branching(&self) -> usize {
        self.rules.iter().map(|r| r.outputs.len()).max().unwrap_or(1)
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        RuleTable {
            rules: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Wire form of a [`Rule`].
#[cfg(feature = "serialization")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RuleRecord {
    pattern: String,
    outputs: RecordOutputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at_start: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at_end: Option<bool>,
}

/// A single output string is shorthand for a one-element list.
#[cfg(feature = "serialization")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum RecordOutputs {
    One(String),
    Many(Vec<String>),
}

#[cfg(feature = "serialization")]
impl TryFrom<RuleRecord> for Rule {
    type Error = ConfigError;

    fn try_from(record: RuleRecord) -> Result<Self> {
        let outputs = match record.outputs {
            RecordOutputs::One(output) => vec![output],
            RecordOutputs::Many(outputs) => outputs,
        };
        let mut rule = Rule::new(&record.pattern, outputs)?;
        rule.at_start = record.at_start;
        rule.at_end = record.at_end;
        Ok(rule)
    }
}

#[cfg(feature = "serialization")]
impl From<Rule> for RuleRecord {
    fn from(rule: Rule) -> Self {
        let outputs = if rule.outputs.len() == 1 {
            RecordOutputs::One(rule.outputs[0].clone())
        } else {
            RecordOutputs::Many(rule.outputs.into_vec())
        };
        RuleRecord {
            pattern: rule.pattern.into_iter().collect(),
            outputs,
            at_start: rule.at_start,
            at_end: rule.at_end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_new() {
        let rule = Rule::new("PH", ["F"]).unwrap();
        assert_eq!(rule.pattern(), &['P', 'H'][..]);
        assert_eq!(rule.outputs(), &["F".to_string()][..]);
        assert_eq!(rule.start_constraint(), None);
        assert_eq!(rule.end_constraint(), None);
    }

    #[test]
    fn test_rule_constraints() {
        let rule = Rule::new("E", [""]).unwrap().at_end(true).at_start(false);
        assert_eq!(rule.start_constraint(), Some(false));
        assert_eq!(rule.end_constraint(), Some(true));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = Rule::new("", ["X"]).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyPattern));
    }

    #[test]
    fn test_no_outputs_rejected() {
        let err = Rule::new("X", Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoOutputs { pattern } if pattern == "X"));
    }

    #[test]
    fn test_deletion_is_a_valid_output() {
        assert!(Rule::new("H", [""]).is_ok());
    }

    #[test]
    fn test_find_match() {
        let table = RuleTable::new(vec![
            Rule::new("CK", ["K"]).unwrap(),
            Rule::new("C", ["K", "S"]).unwrap().at_end(false),
        ]);
        let s: Vec<char> = "BECK".chars().collect();

        assert!(table.rules()[0].can_apply_at(&s, 2));
        assert!(!table.rules()[1].can_apply_at(&s, 3));
        assert_eq!(table.find_match(&s, 2), Some(&table.rules()[0]));
        assert_eq!(table.find_match(&s, 0), None);
    }

    #[test]
    fn test_max_branching() {
        assert_eq!(RuleTable::empty().max_branching(), 1);

        let table: RuleTable = [
            Rule::new("A", ["A"]).unwrap(),
            Rule::new("C", ["K", "S", "TS"]).unwrap(),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.len(), 2);
        assert_eq!(table.max_branching(), 3);
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_from_json() {
        let table = RuleTable::from_json(
            r#"[
                { "pattern": "PH", "outputs": "F" },
                { "pattern": "CH", "outputs": ["K", "SJ"], "at_start": true },
                { "pattern": "E", "outputs": "", "at_end": true }
            ]"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rules()[0], Rule::new("PH", ["F"]).unwrap());
        assert_eq!(
            table.rules()[1],
            Rule::new("CH", ["K", "SJ"]).unwrap().at_start(true)
        );
        assert_eq!(table.rules()[2], Rule::new("E", [""]).unwrap().at_end(true));
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_from_json_rejects_invalid_rules() {
        assert!(RuleTable::from_json(r#"[{ "pattern": "", "outputs": "X" }]"#).is_err());
        assert!(RuleTable::from_json(r#"[{ "pattern": "X", "outputs": [] }]"#).is_err());
        assert!(RuleTable::from_json("not json").is_err());
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_json_round_trip() {
        let table = RuleTable::new(vec![
            Rule::new("SCH", ["SJ"]).unwrap().at_start(true),
            Rule::new("C", ["K", "S"]).unwrap(),
        ]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(RuleTable::from_json(&json).unwrap(), table);
    }
}
