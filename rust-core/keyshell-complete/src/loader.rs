// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Keyword loader.
//!
//! Reads each source line by line into a [`CandidateSet`]. Loading never
//! fails for the caller: unopenable sources are skipped, and a read error
//! stops loading with whatever was collected so far.
//!
//! ## Keyword file format
//!
//! ```text
//! # comment
//! // also a comment
//! LOAD
//! STORE
//! ```
//!
//! Lines are trimmed. Blank lines and lines starting with `#` or `//` are
//! ignored; anything else is a keyword, and keywords with inner whitespace
//! are rejected.

use std::io::BufRead;

use tracing::{debug, instrument, warn};

use crate::candidates::{is_valid_candidate, CandidateSet};
use crate::error::{LoadError, LoadResult};
use crate::source::KeywordSource;

/// Summary of a load pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Names of the sources that were opened, in load order.
    pub sources_read: Vec<String>,
    /// Sources that could not be opened.
    pub sources_skipped: usize,
    /// Keywords newly inserted into the set.
    pub added: usize,
    /// Valid keywords that were already present.
    pub duplicates: usize,
    /// Keywords dropped for containing whitespace.
    pub rejected: usize,
    /// Set when a read error cut loading short.
    pub aborted: bool,
}

/// Loads keyword sources into a candidate set.
pub struct Loader;

impl Loader {
    /// Load `sources` in order into a fresh set.
    pub fn load(sources: Vec<KeywordSource>) -> (CandidateSet, LoadReport) {
        let mut candidates = CandidateSet::new();
        let report = Self::load_into(&mut candidates, sources);
        (candidates, report)
    }

    /// Load `sources` in order into an existing set.
    ///
    /// A read error is logged as a warning and ends the pass; keywords
    /// loaded before it are kept.
    #[instrument(level = "debug", skip_all, fields(sources = sources.len()))]
    pub fn load_into(candidates: &mut CandidateSet, sources: Vec<KeywordSource>) -> LoadReport {
        let mut report = LoadReport::default();
        if let Err(error) = Self::try_load(candidates, sources, &mut report) {
            warn!(error = %error, "Error reading keyword source, remaining sources skipped");
            report.aborted = true;
        }
        debug!(
            loaded = candidates.len(),
            added = report.added,
            rejected = report.rejected,
            "Keyword loading finished"
        );
        report
    }

    fn try_load(
        candidates: &mut CandidateSet,
        sources: Vec<KeywordSource>,
        report: &mut LoadReport,
    ) -> LoadResult<()> {
        for source in sources {
            let name = source.name().to_string();
            match source.open() {
                Some(reader) => {
                    report.sources_read.push(name.clone());
                    Self::read_keywords(candidates, &name, reader, report)?;
                }
                None => report.sources_skipped += 1,
            }
        }
        Ok(())
    }

    /// Consume one opened source. The reader is dropped on return, whether
    /// or not the read succeeded.
    fn read_keywords(
        candidates: &mut CandidateSet,
        name: &str,
        reader: impl BufRead,
        report: &mut LoadReport,
    ) -> LoadResult<()> {
        for line in reader.lines() {
            let line = line.map_err(|error| LoadError::Read {
                source_name: name.to_string(),
                error,
            })?;
            let Some(keyword) = keyword_line(&line) else {
                continue;
            };
            if candidates.add(keyword) {
                report.added += 1;
            } else if is_valid_candidate(keyword) {
                report.duplicates += 1;
            } else {
                report.rejected += 1;
            }
        }
        debug!(source = %name, "Keyword source loaded");
        Ok(())
    }
}

/// The keyword on a line, or `None` for blank and comment lines.
fn keyword_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
        None
    } else {
        Some(trimmed)
    }
}
