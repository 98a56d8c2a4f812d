// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! The set of keywords offered as completions.
//!
//! Candidates are kept in a `BTreeSet`, so iteration is lexicographic and a
//! prefix query is a range scan that stops at the first non-matching key.

use std::collections::BTreeSet;
use std::ops::Bound;

use tracing::warn;

/// Unique, case-sensitive, whitespace-free keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    keywords: BTreeSet<String>,
}

impl CandidateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword.
    ///
    /// Keywords containing whitespace are dropped with a warning. Returns
    /// `true` only when the keyword was not already present.
    pub fn add(&mut self, keyword: &str) -> bool {
        if !is_valid_candidate(keyword) {
            warn!(
                keyword = %keyword,
                "Auto-complete keyword skipped because it contains white space"
            );
            return false;
        }
        self.keywords.insert(keyword.to_string())
    }

    /// Whether `keyword` is in the set.
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the set holds no keywords.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// All keywords in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Keywords starting with `prefix`, in lexicographic order.
    ///
    /// Every string sharing a prefix sorts contiguously from the prefix
    /// itself, so the scan starts there and ends at the first miss.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.keywords
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .map(String::as_str)
            .take_while(move |keyword| keyword.starts_with(prefix))
    }
}

impl<'a> Extend<&'a str> for CandidateSet {
    fn extend<T: IntoIterator<Item = &'a str>>(&mut self, iter: T) {
        for keyword in iter {
            self.add(keyword);
        }
    }
}

impl<'a> FromIterator<&'a str> for CandidateSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// A candidate is valid when it contains no whitespace character.
pub fn is_valid_candidate(keyword: &str) -> bool {
    !keyword.chars().any(char::is_whitespace)
}
