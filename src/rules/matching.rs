//! Pattern and position matching for rewrite rules.
//!
//! # Functions
//!
//! - [`pattern_matches_at`] - Literal pattern comparison at a position
//! - [`constraint_holds`] - Tri-state start/end constraint check
//! - [`can_apply_at`] - Both of the above for one rule
//! - [`find_rule_at`] - First applicable rule of a table

use super::types::{Rule, RuleTable};

/// Check if `pattern` occurs in `s` starting at `pos`.
///
/// Characters are compared exactly; no case folding happens here.
#[inline]
pub fn pattern_matches_at(pattern: &[char], s: &[char], pos: usize) -> bool {
    s.get(pos..pos + pattern.len())
        .is_some_and(|window| window == pattern)
}

/// Check a position constraint.
///
/// `None` accepts anything, `Some(required)` accepts only when `holds`
/// equals `required`.
#[inline]
pub fn constraint_holds(constraint: Option<bool>, holds: bool) -> bool {
    constraint.map_or(true, |required| required == holds)
}

/// Check if `rule` can be applied to `s` at `pos`.
///
/// The start constraint is checked against `pos == 0`, the end constraint
/// against the match ending exactly at `s.len()`.
#[inline]
pub fn can_apply_at(rule: &Rule, s: &[char], pos: usize) -> bool {
    let end = pos + rule.pattern().len();

    constraint_holds(rule.start_constraint(), pos == 0)
        && constraint_holds(rule.end_constraint(), end == s.len())
        && pattern_matches_at(rule.pattern(), s, pos)
}

/// Find the rule that fires at `pos`.
///
/// Rules are scanned in table order and the first applicable one wins, even
/// when a later rule would match a longer pattern.
#[inline]
pub fn find_rule_at<'t>(table: &'t RuleTable, s: &[char], pos: usize) -> Option<&'t Rule> {
    table.iter().find(|rule| can_apply_at(rule, s, pos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_pattern_matches_at() {
        let s = chars("SCHMIDT");
        assert!(pattern_matches_at(&['S', 'C', 'H'], &s, 0));
        assert!(!pattern_matches_at(&['S', 'C', 'H'], &s, 1));
        assert!(pattern_matches_at(&['D', 'T'], &s, 5));
        assert!(!pattern_matches_at(&['T', 'X'], &s, 6));
        assert!(!pattern_matches_at(&['T'], &s, 7));
    }

    #[test]
    fn test_pattern_is_case_exact() {
        assert!(!pattern_matches_at(&['c', 'h'], &chars("CH"), 0));
    }

    #[test]
    fn test_constraint_holds() {
        assert!(constraint_holds(None, true));
        assert!(constraint_holds(None, false));
        assert!(constraint_holds(Some(true), true));
        assert!(!constraint_holds(Some(true), false));
        assert!(constraint_holds(Some(false), false));
        assert!(!constraint_holds(Some(false), true));
    }

    #[test]
    fn test_can_apply_at_start_constraint() {
        let s = chars("KAKA");
        let initial = Rule::new("K", ["G"]).unwrap().at_start(true);
        let medial = Rule::new("K", ["G"]).unwrap().at_start(false);
        assert!(can_apply_at(&initial, &s, 0));
        assert!(!can_apply_at(&initial, &s, 2));
        assert!(!can_apply_at(&medial, &s, 0));
        assert!(can_apply_at(&medial, &s, 2));
    }

    #[test]
    fn test_can_apply_at_end_constraint() {
        let s = chars("EDE");
        let last = Rule::new("E", [""]).unwrap().at_end(true);
        let not_last = Rule::new("E", [""]).unwrap().at_end(false);
        assert!(!can_apply_at(&last, &s, 0));
        assert!(can_apply_at(&last, &s, 2));
        assert!(can_apply_at(&not_last, &s, 0));
        assert!(!can_apply_at(&not_last, &s, 2));
    }

    #[test]
    fn test_end_constraint_uses_pattern_end() {
        let s = chars("BERG");
        let rule = Rule::new("RG", ["RJ"]).unwrap().at_end(true);
        assert!(can_apply_at(&rule, &s, 2));
    }

    #[test]
    fn test_find_rule_at_prefers_table_order() {
        let table = RuleTable::new(vec![
            Rule::new("S", ["S"]).unwrap(),
            Rule::new("SCH", ["SJ"]).unwrap(),
        ]);
        let s = chars("SCHMIDT");
        let rule = find_rule_at(&table, &s, 0).unwrap();
        assert_eq!(rule.pattern(), &['S'][..]);
        assert!(find_rule_at(&table, &s, 3).is_none());
    }

    #[test]
    fn test_find_rule_at_skips_constrained_rules() {
        let table = RuleTable::new(vec![
            Rule::new("SCH", ["SJ"]).unwrap().at_start(false),
            Rule::new("SC", ["SK"]).unwrap(),
        ]);
        let rule = find_rule_at(&table, &chars("SCHMIDT"), 0).unwrap();
        assert_eq!(rule.pattern(), &['S', 'C'][..]);
    }
}
