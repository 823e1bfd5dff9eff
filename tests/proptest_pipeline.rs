//! Property-based tests for the fingerprint pipeline using proptest
//!
//! Each property holds for arbitrary words and rule tables, not just the
//! hand-picked names in the scenario tests.

use phonoprint::normalize::{is_placeholder, Normalizer, SCANDINAVIAN_LETTERS};
use phonoprint::postprocess::{cap_vowels, compress_runs, truncate};
use phonoprint::prelude::*;
use proptest::prelude::*;

// Strategy for generating name-like words, accents and Scandinavian letters
// included
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-ZåäöæøÅÄÖÆØéèüÜç' -]{0,12}"
}

// Strategy for generating normalized words over a small alphabet so that
// rules actually fire
fn normalized_strategy() -> impl Strategy<Value = String> {
    "[ABCEKLOS]{0,10}"
}

fn rule_strategy() -> impl Strategy<Value = Rule> {
    (
        "[ABCEKLOS]{1,3}",
        prop::collection::vec("[A-Z]{0,2}", 1..3),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(pattern, outputs, at_start, at_end)| {
            let mut rule = Rule::new(&pattern, outputs).unwrap();
            if let Some(at_start) = at_start {
                rule = rule.at_start(at_start);
            }
            if let Some(at_end) = at_end {
                rule = rule.at_end(at_end);
            }
            rule
        })
}

// Letters that are protectable, most of them with a canonical decomposition
const PROTECTABLE: &[char] = &['Å', 'Ä', 'Ö', 'Æ', 'Ø', 'É', 'Ñ', 'Ü', 'Ç'];

const PROTECTABLE_LOWER: &[char] = &['å', 'ä', 'ö', 'æ', 'ø', 'é', 'ñ', 'ü', 'ç'];

const PLAIN_CONSONANTS: &[char] = &['B', 'D', 'K', 'L', 'M', 'R', 's', 't'];

const STRAY_MARKS: &[char] = &[
    '\u{0301}', '\u{0303}', '\u{0304}', '\u{0308}', '\u{030A}', '\u{0323}', '\u{0327}',
];

fn protected_set_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::sample::subsequence(PROTECTABLE, 0..=PROTECTABLE.len())
}

// Words mixing protectable letters (either case) and plain consonants, each
// followed by up to two stray combining marks. The consonants share no base
// letter with the protectable ones.
fn marked_word_strategy() -> impl Strategy<Value = String> {
    let letter = prop_oneof![
        prop::sample::select(PROTECTABLE),
        prop::sample::select(PROTECTABLE_LOWER),
        prop::sample::select(PLAIN_CONSONANTS),
    ];
    let marks = prop::collection::vec(prop::sample::select(STRAY_MARKS), 0..3);
    prop::collection::vec((letter, marks), 0..8).prop_map(|clusters| {
        clusters
            .into_iter()
            .flat_map(|(letter, marks)| std::iter::once(letter).chain(marks))
            .collect()
    })
}

fn table_strategy() -> impl Strategy<Value = RuleTable> {
    prop::collection::vec(rule_strategy(), 0..6).prop_map(RuleTable::new)
}

proptest! {
    #[test]
    fn normalize_is_idempotent(word in word_strategy()) {
        let normalizer = Normalizer::new(SCANDINAVIAN_LETTERS, &['-']).unwrap();
        let once = normalizer.normalize(&word);
        prop_assert_eq!(normalizer.normalize(&once), once);
    }

    #[test]
    fn normalize_free_function_is_idempotent(word in word_strategy()) {
        let once = normalize(&word, None, None);
        prop_assert_eq!(normalize(&once, None, None), once);
    }

    #[test]
    fn normalize_output_alphabet(word in word_strategy()) {
        let normalized = Normalizer::scandinavian().normalize(&word);
        for c in normalized.chars() {
            prop_assert!(c.is_ascii_uppercase() || SCANDINAVIAN_LETTERS.contains(&c));
            prop_assert!(!is_placeholder(c));
        }
    }

    #[test]
    fn protected_letters_round_trip(word in "[a-zåäöæø]{0,10}") {
        // Every protected letter in the input survives, in order.
        let normalized = Normalizer::scandinavian().normalize(&word);
        let expected: Vec<char> = word
            .to_uppercase()
            .chars()
            .filter(|c| SCANDINAVIAN_LETTERS.contains(c))
            .collect();
        let actual: Vec<char> = normalized
            .chars()
            .filter(|c| SCANDINAVIAN_LETTERS.contains(c))
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn protected_letters_survive_any_configuration(
        protected in protected_set_strategy(),
        word in marked_word_strategy(),
    ) {
        let normalizer = Normalizer::new(&protected, &[]).unwrap();
        let normalized = normalizer.normalize(&word);

        let expected: Vec<char> = word
            .to_uppercase()
            .chars()
            .filter(|c| protected.contains(c))
            .collect();
        let actual: Vec<char> = normalized
            .chars()
            .filter(|c| protected.contains(c))
            .collect();
        prop_assert_eq!(actual, expected);

        for c in normalized.chars() {
            prop_assert!(c.is_ascii_uppercase() || protected.contains(&c));
        }
        prop_assert_eq!(normalizer.normalize(&normalized), normalized);
    }

    #[test]
    fn expand_is_total(word in normalized_strategy(), table in table_strategy()) {
        prop_assert!(!expand(&word, &table).is_empty());
    }

    #[test]
    fn expand_empty_table_is_identity(word in word_strategy()) {
        prop_assert_eq!(expand(&word, &RuleTable::empty()), vec![word]);
    }

    #[test]
    fn expand_count_is_product_of_branching(word in normalized_strategy(), table in table_strategy()) {
        // With no deduplication, every production is reachable and the
        // count never exceeds max_branching ^ len.
        let productions = expand(&word, &table);
        let bound = table
            .max_branching()
            .saturating_pow(word.chars().count() as u32);
        prop_assert!(productions.len() <= bound.max(1));
    }

    #[test]
    fn vowel_drop_yields_one_or_two(word in normalized_strategy()) {
        let variants = expand_second_vowel(&word);
        prop_assert!(variants.len() == 1 || variants.len() == 2);
        prop_assert_eq!(&variants[0], &word);
        if variants.len() == 2 {
            prop_assert_eq!(variants[1].chars().count() + 1, word.chars().count());
        }
    }

    #[test]
    fn cap_vowels_respects_quota(word in "[A-ZÅÄÖÆØ]{0,16}", max in 0usize..5) {
        let alphabet = Alphabet::default();
        let capped = cap_vowels(&word, max, &alphabet);

        let vowels = capped.chars().filter(|&c| alphabet.is_vowel(c)).count();
        prop_assert!(vowels <= max);

        let consonants = |s: &str| -> String {
            s.chars().filter(|&c| !alphabet.is_vowel(c)).collect()
        };
        prop_assert_eq!(consonants(&capped), consonants(&word));
    }

    #[test]
    fn compress_runs_leaves_no_runs(word in "[ABK]{0,16}") {
        let compressed = compress_runs(&word);
        let chars: Vec<char> = compressed.chars().collect();
        prop_assert!(chars.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn truncate_keeps_head_and_tail(word in "[A-Z]{4,20}") {
        let truncated = truncate(&word, 3, 3);
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();

        let expected_len = len.min(6);
        prop_assert_eq!(truncated.chars().count(), expected_len);
        prop_assert!(truncated.starts_with(&word[..3]));
        prop_assert!(word.ends_with(&truncated[3..]));
    }

    #[test]
    fn fingerprint_codes_are_nonempty(word in word_strategy(), table in table_strategy()) {
        let fp = fingerprint(&word, &[table], &PostProcessOptions::default());
        prop_assert!(fp.iter().all(|code| !code.is_empty()));
    }

    #[test]
    fn fingerprint_matches_itself(word in "[a-z]{1,10}") {
        let fingerprinter = Fingerprinter::default();
        let fp = fingerprinter.fingerprint(&word);
        prop_assert_eq!(fp.intersects(&fp), !fp.is_empty());
    }

    #[test]
    fn matching_is_symmetric(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let fingerprinter = Fingerprinter::default();
        prop_assert_eq!(fingerprinter.matches(&a, &b), fingerprinter.matches(&b, &a));
    }
}
