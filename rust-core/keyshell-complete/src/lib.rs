// SPDX-License-Identifier: PMPL-1.0-or-later
//
// keyshell keyword completion crate
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tab-completion candidates for an interactive shell. Keywords are read from
// plain-text keyword files into a deduplicated set once, at construction;
// afterwards each completion request is an in-memory prefix lookup.
//
// # Sources
//
// Sources are loaded in priority order, all into the same set:
//
// 1. `autocomplete` in the working directory, if present.
// 2. Every `autocomplete` file on the search path (`KEYSHELL_PATH`).
// 3. The keyword list bundled with this crate.
//
// ## Usage
//
// ```no_run
// use keyshell_complete::{Completion, CompletionConfig, KeywordCompleter};
//
// let (completer, _report) = KeywordCompleter::from_config(&CompletionConfig::from_env());
//
// match completer.complete("a = LO", 6) {
//     Completion::Matches { start, candidates } => {
//         println!("replace from {start} with one of {candidates:?}");
//     }
//     Completion::NoMatch => {}
// }
// ```

pub mod candidates;
pub mod completer;
pub mod config;
pub mod error;
pub mod loader;
pub mod source;

// Re-export the primary public API for ergonomic imports.
pub use candidates::{is_valid_candidate, CandidateSet};
pub use completer::{Completion, KeywordCompleter};
pub use config::{CompletionConfig, DEFAULT_FILE_NAME, SEARCH_PATH_ENV};
pub use error::{ConfigError, ConfigResult, LoadError, LoadResult};
pub use loader::{LoadReport, Loader};
pub use source::{KeywordSource, SourceResolver, BUNDLED_KEYWORDS, BUNDLED_NAME};
