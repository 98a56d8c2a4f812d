// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Tab-completion for the keyshell prompt.
//!
//! Bridges the keyword completer to rustyline: the word under the cursor is
//! replaced by one of the loaded keywords that extends it.

use std::sync::Arc;

use keyshell_complete::{Completion, KeywordCompleter};
use rustyline::completion::{Completer, Pair};
use rustyline::Context;

/// Tab-completer for keyshell input.
pub struct ShellCompleter {
    keywords: Arc<KeywordCompleter>,
}

impl ShellCompleter {
    pub fn new(keywords: Arc<KeywordCompleter>) -> Self {
        Self { keywords }
    }
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(to_pairs(self.keywords.complete(line, pos)))
    }
}

/// Convert a completion into rustyline's `(start, candidates)` form.
///
/// No match becomes `(0, [])`, which rustyline treats as nothing to insert.
fn to_pairs(completion: Completion) -> (usize, Vec<Pair>) {
    let (start, candidates) = completion.into_parts();
    let pairs = candidates
        .into_iter()
        .map(|keyword| Pair {
            display: keyword.clone(),
            replacement: keyword,
        })
        .collect();
    (start, pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyshell_complete::CandidateSet;

    fn keywords() -> KeywordCompleter {
        let set: CandidateSet = ["LOAD", "LOAD_ORDERED", "STORE"].into_iter().collect();
        KeywordCompleter::from_candidates(set)
    }

    #[test]
    fn test_to_pairs_matches() {
        let (start, pairs) = to_pairs(keywords().complete("a = LO", 6));
        assert_eq!(start, 4);
        let replacements: Vec<&str> = pairs.iter().map(|p| p.replacement.as_str()).collect();
        assert_eq!(replacements, vec!["LOAD", "LOAD_ORDERED"]);
        assert!(pairs.iter().all(|p| p.display == p.replacement));
    }

    #[test]
    fn test_to_pairs_no_match() {
        let (start, pairs) = to_pairs(keywords().complete("XYZ", 3));
        assert_eq!(start, 0);
        assert!(pairs.is_empty());
    }

    // Note: Completer::complete itself needs a rustyline Context, which is
    // awkward to build in unit tests; the conversion above is all it adds.
}
