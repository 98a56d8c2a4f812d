// SPDX-License-Identifier: PMPL-1.0-or-later
//! Property-based tests for keyword completion

use keyshell_complete::{CandidateSet, Completion, KeywordCompleter};
use proptest::prelude::*;

/// Generate whitespace-free keywords
fn arb_keyword() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,10}"
}

/// Generate keywords with at least one embedded whitespace character
fn arb_spaced_keyword() -> impl Strategy<Value = String> {
    ("[A-Za-z]{0,5}", "[ \t\n\r\u{a0}\u{3000}]", "[A-Za-z]{0,5}")
        .prop_map(|(head, space, tail)| format!("{head}{space}{tail}"))
}

/// Generate shell input lines made of keyword-like words and spaces
fn arb_buffer() -> impl Strategy<Value = String> {
    "[A-Za-z_ =]{0,24}"
}

fn completer_from(keywords: &[String]) -> KeywordCompleter {
    KeywordCompleter::from_candidates(keywords.iter().map(String::as_str).collect())
}

proptest! {
    #[test]
    fn test_cursor_zero_never_completes(
        keywords in prop::collection::vec(arb_keyword(), 0..20),
        buffer in arb_buffer()
    ) {
        let completer = completer_from(&keywords);
        prop_assert_eq!(completer.complete(&buffer, 0), Completion::NoMatch);
    }

    #[test]
    fn test_add_is_idempotent(keyword in arb_keyword(), repeats in 1usize..5) {
        let mut set = CandidateSet::new();
        for _ in 0..repeats {
            set.add(&keyword);
        }
        prop_assert_eq!(set.len(), 1);
        prop_assert_eq!(set.iter().filter(|k| *k == keyword).count(), 1);
    }

    #[test]
    fn test_whitespace_keywords_never_inserted(keyword in arb_spaced_keyword()) {
        let mut set = CandidateSet::new();
        prop_assert!(!set.add(&keyword));
        prop_assert!(set.is_empty());
    }

    #[test]
    fn test_complete_is_idempotent(
        keywords in prop::collection::vec(arb_keyword(), 0..20),
        buffer in arb_buffer(),
        cursor in 0usize..30
    ) {
        let completer = completer_from(&keywords);
        prop_assert_eq!(completer.complete(&buffer, cursor), completer.complete(&buffer, cursor));
    }

    #[test]
    fn test_matches_extend_token_in_order(
        keywords in prop::collection::vec(arb_keyword(), 1..30),
        pick in any::<prop::sample::Index>(),
        prefix_len in 1usize..4,
        lead in "[a-z]{0,4} "
    ) {
        let completer = completer_from(&keywords);
        let keyword = pick.get(&keywords);
        let token: String = keyword.chars().take(prefix_len).collect();
        let buffer = format!("{lead}{token}");

        match completer.complete(&buffer, buffer.len()) {
            Completion::Matches { start, candidates } => {
                prop_assert_eq!(start, lead.len());
                prop_assert!(!candidates.is_empty());
                for candidate in &candidates {
                    prop_assert!(candidate.starts_with(&token));
                    prop_assert_ne!(candidate, &token);
                }
                let mut sorted = candidates.clone();
                sorted.sort();
                sorted.dedup();
                prop_assert_eq!(sorted, candidates);
            }
            Completion::NoMatch => {
                // Only possible when the token itself is the sole extension.
                prop_assert!(keywords
                    .iter()
                    .filter(|k| k.starts_with(&token))
                    .all(|k| *k == token));
            }
        }
    }
}
