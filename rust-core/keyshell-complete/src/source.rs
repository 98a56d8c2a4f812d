// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//!
//! Keyword sources and the resolver that orders them.
//!
//! A [`KeywordSource`] is anything that can be opened once and read as lines
//! of text: the keyword file in the working directory, a keyword file found
//! on the search path, the list compiled into this crate, or an arbitrary
//! reader handed in by the embedding application.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CompletionConfig;

/// Keyword list shipped with the crate.
pub const BUNDLED_KEYWORDS: &str = include_str!("../resources/autocomplete");

/// Display name of [`BUNDLED_KEYWORDS`].
pub const BUNDLED_NAME: &str = "bundled:default";

/// A readable stream of keyword lines, consumed once by the loader.
pub struct KeywordSource {
    name: String,
    origin: Origin,
}

enum Origin {
    /// Keyword file in the working directory. Absence is expected.
    WorkingDir(PathBuf),
    /// Keyword file found on the search path.
    Discovered(PathBuf),
    /// Text compiled into the binary.
    Static(&'static str),
    /// Caller-supplied stream.
    Reader(Box<dyn Read + Send>),
}

impl KeywordSource {
    /// The keyword file in a working directory.
    pub fn working_dir_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            origin: Origin::WorkingDir(path),
        }
    }

    /// A keyword file discovered on the search path.
    pub fn discovered(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: path.display().to_string(),
            origin: Origin::Discovered(path),
        }
    }

    /// The default keyword list compiled into this crate.
    pub fn bundled() -> Self {
        Self::from_static(BUNDLED_NAME, BUNDLED_KEYWORDS)
    }

    /// In-memory keyword text.
    pub fn from_static(name: impl Into<String>, text: &'static str) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Static(text),
        }
    }

    /// Any byte stream, e.g. a socket or a decompressed archive entry.
    pub fn from_reader(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self {
            name: name.into(),
            origin: Origin::Reader(Box::new(reader)),
        }
    }

    /// Display name used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Open the source for reading.
    ///
    /// Returns `None` when a file cannot be opened; that is logged at debug
    /// level and the source is skipped.
    pub fn open(self) -> Option<Box<dyn BufRead + Send>> {
        match self.origin {
            Origin::WorkingDir(path) => match open_file(&path) {
                Ok(file) => Some(Box::new(BufReader::new(file))),
                Err(error) => {
                    debug!(
                        path = %path.display(),
                        error = %error,
                        "Can not find keyword file in working directory, skipped"
                    );
                    None
                }
            },
            Origin::Discovered(path) => match open_file(&path) {
                Ok(file) => Some(Box::new(BufReader::new(file))),
                Err(error) => {
                    debug!(path = %path.display(), error = %error, "Error loading keyword file, skipped");
                    None
                }
            },
            Origin::Static(text) => Some(Box::new(text.as_bytes())),
            Origin::Reader(reader) => Some(Box::new(BufReader::new(reader))),
        }
    }
}

impl fmt::Debug for KeywordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.origin {
            Origin::WorkingDir(_) => "working-dir",
            Origin::Discovered(_) => "discovered",
            Origin::Static(_) => "static",
            Origin::Reader(_) => "reader",
        };
        f.debug_struct("KeywordSource")
            .field("name", &self.name)
            .field("kind", &kind)
            .finish()
    }
}

impl fmt::Display for KeywordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Turns a [`CompletionConfig`] into the priority-ordered source list:
/// working-directory file, then every file on the search path, then the
/// bundled list.
#[derive(Debug, Clone)]
pub struct SourceResolver {
    config: CompletionConfig,
}

impl SourceResolver {
    pub fn new(config: CompletionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Resolve the sources to load, in priority order.
    pub fn resolve(&self) -> Vec<KeywordSource> {
        let mut sources = Vec::with_capacity(self.config.search_path.len() + 2);

        sources.push(KeywordSource::working_dir_file(
            self.config.working_dir().join(&self.config.file_name),
        ));
        sources.extend(self.discover().into_iter().map(KeywordSource::discovered));
        if self.config.include_bundled {
            sources.push(KeywordSource::bundled());
        }

        sources
    }

    /// Keyword files present on the search path. Directories without one
    /// contribute nothing.
    pub fn discover(&self) -> Vec<PathBuf> {
        self.config
            .search_path
            .iter()
            .map(|dir| dir.join(&self.config.file_name))
            .filter(|candidate| {
                let found = is_file(candidate);
                if !found {
                    debug!(path = %candidate.display(), "No keyword file on search path entry");
                }
                found
            })
            .collect()
    }
}

/// Open `path` only if it is a regular file. `File::open` succeeds on a
/// directory on Unix, and the failure would otherwise surface on first read.
fn open_file(path: &Path) -> io::Result<File> {
    if !is_file(path) {
        return Err(io::Error::new(io::ErrorKind::NotFound, "not a regular file"));
    }
    File::open(path)
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|meta| meta.is_file()).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(source: KeywordSource) -> Option<Vec<String>> {
        source
            .open()
            .map(|reader| reader.lines().map(|line| line.unwrap()).collect())
    }

    #[test]
    fn test_missing_working_dir_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = KeywordSource::working_dir_file(dir.path().join("autocomplete"));
        assert!(source.open().is_none());
    }

    #[test]
    fn test_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("autocomplete");
        std::fs::create_dir(&nested).unwrap();
        assert!(KeywordSource::working_dir_file(&nested).open().is_none());
        assert!(KeywordSource::discovered(&nested).open().is_none());
    }

    #[test]
    fn test_reader_source() {
        let source = KeywordSource::from_reader("mem", Cursor::new(b"LOAD\nSTORE\n".to_vec()));
        assert_eq!(source.name(), "mem");
        assert_eq!(read_all(source).unwrap(), vec!["LOAD", "STORE"]);
    }

    #[test]
    fn test_bundled_source_is_not_empty() {
        let lines = read_all(KeywordSource::bundled()).unwrap();
        assert!(lines.iter().any(|line| line.trim() == "LOAD"));
    }

    #[test]
    fn test_resolve_order() {
        let cwd = tempfile::tempdir().unwrap();
        let with_file = tempfile::tempdir().unwrap();
        let without_file = tempfile::tempdir().unwrap();
        std::fs::write(with_file.path().join("autocomplete"), "STORE\n").unwrap();

        let config = CompletionConfig {
            working_dir: Some(cwd.path().to_path_buf()),
            search_path: vec![without_file.path().to_path_buf(), with_file.path().to_path_buf()],
            ..CompletionConfig::default()
        };
        let sources = SourceResolver::new(config).resolve();
        let names: Vec<&str> = sources.iter().map(KeywordSource::name).collect();

        assert_eq!(names.len(), 3);
        assert_eq!(names[0], cwd.path().join("autocomplete").display().to_string());
        assert_eq!(names[1], with_file.path().join("autocomplete").display().to_string());
        assert_eq!(names[2], BUNDLED_NAME);
    }

    #[test]
    fn test_resolve_without_bundled() {
        let config = CompletionConfig {
            include_bundled: false,
            ..CompletionConfig::default()
        };
        let sources = SourceResolver::new(config).resolve();
        assert_eq!(sources.len(), 1);
        assert!(format!("{:?}", sources[0]).contains("working-dir"));
    }
}
