// SPDX-License-Identifier: PMPL-1.0-or-later
//
// keyshell completion - Error types
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Keyword loading never fails from the caller's point of view: these errors
// travel inside the loader and are logged at the top of the load step.
// Configuration errors do surface, since a broken config file is a user
// mistake the shell should report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading keyword sources.
#[derive(Debug, Error)]
pub enum LoadError {
    /// An I/O error occurred part-way through reading a source.
    ///
    /// Invalid UTF-8 in a keyword file also lands here, as an
    /// `InvalidData` I/O error from the line reader.
    #[error("failed to read keyword source {source_name}: {error}")]
    Read {
        /// Display name of the source being read.
        source_name: String,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },
}

/// Convenience type alias for loader results.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while building a [`crate::CompletionConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}: {error}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// The config file is not valid JSON for [`crate::CompletionConfig`].
    #[error("invalid config file {path}: {error}")]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// The JSON decoding error.
        #[source]
        error: serde_json::Error,
    },
}

/// Convenience type alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_read() {
        let error = LoadError::Read {
            source_name: "bundled:default".to_string(),
            error: std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8"),
        };
        let message = format!("{error}");
        assert!(message.contains("bundled:default"));
        assert!(message.contains("valid UTF-8"));
    }

    #[test]
    fn test_error_display_config_io() {
        let error = ConfigError::Io {
            path: PathBuf::from("/etc/keyshell.json"),
            error: std::io::Error::new(std::io::ErrorKind::NotFound, "file gone"),
        };
        let message = format!("{error}");
        assert!(message.contains("/etc/keyshell.json"));
        assert!(message.contains("file gone"));
    }
}
