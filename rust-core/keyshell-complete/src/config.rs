// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//! Completion configuration.
//!
//! Defaults:
//! - file_name: `autocomplete`
//! - working_dir: process cwd
//! - search_path: empty (extended from `KEYSHELL_PATH`)
//! - include_bundled: true

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Name of the keyword file looked up in the working directory and on the
/// search path.
pub const DEFAULT_FILE_NAME: &str = "autocomplete";

/// Environment variable holding extra search-path directories, in the
/// platform's path-list syntax (`:` on Unix, `;` on Windows).
pub const SEARCH_PATH_ENV: &str = "KEYSHELL_PATH";

/// Where the keyword loader looks for keyword files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionConfig {
    /// File name probed in the working directory and each search directory.
    pub file_name: String,
    /// Directory for the highest-priority keyword file. `None` means the
    /// process working directory.
    pub working_dir: Option<PathBuf>,
    /// Directories searched for additional keyword files.
    pub search_path: Vec<PathBuf>,
    /// Whether to load the keyword list compiled into this crate.
    pub include_bundled: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            working_dir: None,
            search_path: Vec::new(),
            include_bundled: true,
        }
    }
}

impl CompletionConfig {
    /// Defaults plus any directories listed in `KEYSHELL_PATH`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.extend_from_env();
        config
    }

    /// Read a JSON config file. Missing fields take their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        serde_json::from_str(&text).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Append the directories listed in `KEYSHELL_PATH`, if set.
    pub fn extend_from_env(&mut self) {
        if let Some(value) = std::env::var_os(SEARCH_PATH_ENV) {
            self.search_path.extend(
                std::env::split_paths(&value).filter(|dir| !dir.as_os_str().is_empty()),
            );
        }
    }

    /// Directory holding the highest-priority keyword file.
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
