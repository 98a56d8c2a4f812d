// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Prefix completion against the loaded keywords.
//!
//! The token being completed is the run of non-whitespace characters ending
//! at the cursor. Every keyword that extends it, other than the token
//! itself, is offered, in lexicographic order.

use tracing::info;

use crate::candidates::CandidateSet;
use crate::config::CompletionConfig;
use crate::loader::{LoadReport, Loader};
use crate::source::{KeywordSource, SourceResolver};

/// Outcome of a completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to offer; the line editor should leave the buffer alone.
    NoMatch,
    /// Keywords extending the token that starts at byte offset `start`.
    Matches {
        start: usize,
        candidates: Vec<String>,
    },
}

impl Completion {
    /// Replacement offset, or 0 for [`Completion::NoMatch`].
    pub fn start(&self) -> usize {
        match self {
            Completion::NoMatch => 0,
            Completion::Matches { start, .. } => *start,
        }
    }

    /// The matching keywords, empty for [`Completion::NoMatch`].
    pub fn candidates(&self) -> &[String] {
        match self {
            Completion::NoMatch => &[],
            Completion::Matches { candidates, .. } => candidates,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Completion::Matches { .. })
    }

    /// `(start, candidates)` in line-editor form: no match is `(0, [])`.
    pub fn into_parts(self) -> (usize, Vec<String>) {
        match self {
            Completion::NoMatch => (0, Vec::new()),
            Completion::Matches { start, candidates } => (start, candidates),
        }
    }
}

/// Completes whitespace-delimited tokens from a fixed keyword set.
///
/// Keywords are loaded once at construction and never change afterwards, so
/// a completer can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct KeywordCompleter {
    candidates: CandidateSet,
}

impl KeywordCompleter {
    /// Load keywords from `sources`. Loading problems are logged, never
    /// returned.
    pub fn new(sources: Vec<KeywordSource>) -> Self {
        Self::with_report(sources).0
    }

    /// Like [`KeywordCompleter::new`], also returning what the load did.
    pub fn with_report(sources: Vec<KeywordSource>) -> (Self, LoadReport) {
        let (candidates, report) = Loader::load(sources);
        info!(
            keywords = candidates.len(),
            sources = report.sources_read.len(),
            "Keyword completer ready"
        );
        (Self { candidates }, report)
    }

    /// Resolve sources from `config` and load them.
    pub fn from_config(config: &CompletionConfig) -> (Self, LoadReport) {
        Self::with_report(SourceResolver::new(config.clone()).resolve())
    }

    /// Wrap an already-built set.
    pub fn from_candidates(candidates: CandidateSet) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Complete the token ending at byte offset `cursor` in `buffer`.
    ///
    /// A cursor past the end is clamped to `buffer.len()`, and one inside a
    /// multi-byte character is moved back to that character's start.
    pub fn complete(&self, buffer: &str, cursor: usize) -> Completion {
        let cursor = floor_char_boundary(buffer, cursor);
        if cursor == 0 {
            return Completion::NoMatch;
        }

        let start = token_start(buffer, cursor);
        let token = &buffer[start..cursor];
        if token.is_empty() {
            return Completion::NoMatch;
        }

        let candidates: Vec<String> = self
            .candidates
            .with_prefix(token)
            .filter(|keyword| *keyword != token)
            .map(str::to_string)
            .collect();

        if candidates.is_empty() {
            Completion::NoMatch
        } else {
            Completion::Matches { start, candidates }
        }
    }
}

/// Start of the token ending at `cursor`: one past the nearest preceding
/// whitespace character, or 0.
///
/// Offset 0 is checked too: `" LO"` completes `LO` from offset 1.
fn token_start(buffer: &str, cursor: usize) -> usize {
    buffer[..cursor]
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map(|(idx, ch)| idx + ch.len_utf8())
        .unwrap_or(0)
}

fn floor_char_boundary(buffer: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(buffer.len());
    while !buffer.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}
