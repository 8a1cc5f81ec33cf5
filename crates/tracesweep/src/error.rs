// Dweve TraceSweep - Benchmark sweep orchestration and scaling charts
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Structured error types for sweep orchestration and plotting.
//!
//! Every fallible operation in this crate returns `Result<T, SweepError>`.
//! Errors carry the file or command they relate to so that per-configuration
//! failures can be reported without further context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenient result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SweepError>;

/// The main error type for TraceSweep operations.
///
/// # Cloning
///
/// Implements `Clone` so batch results can be copied into reports and shared
/// across the parallel plotting phase.
///
/// # Examples
///
/// ```rust,no_run
/// use tracesweep::error::SweepError;
///
/// fn read_result(path: &str) -> Result<String, SweepError> {
///     std::fs::read_to_string(path).map_err(|e| SweepError::io_error(path, e))
/// }
/// ```
#[derive(Error, Debug, Clone)]
pub enum SweepError {
    /// I/O operation failed (file read, write, directory creation).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// Result file exceeds the maximum allowed size.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes")]
    FileTooLarge {
        /// The offending file
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Configured limit in bytes
        max: u64,
    },

    /// The benchmark executable could not be started.
    #[error("Failed to start '{program}': {message}")]
    Spawn {
        /// The program that was invoked
        program: String,
        /// The error message
        message: String,
    },

    /// The benchmark executable ran but exited unsuccessfully.
    #[error("Benchmark '{command}' exited with {status}")]
    BenchmarkFailed {
        /// Rendered command line
        command: String,
        /// Exit status description (`exit status: 1`, `signal: 9`, ...)
        status: String,
    },

    /// The result file is not a valid benchmark record.
    #[error("Malformed result '{path}': {message}")]
    MalformedResult {
        /// The result file
        path: PathBuf,
        /// What was wrong with it
        message: String,
    },

    /// The number of parallel timings disagrees with the expected worker range.
    #[error("Result '{path}' has {actual} parallel timings, expected {expected}")]
    SchemaMismatch {
        /// The result file
        path: PathBuf,
        /// Expected number of worker counts
        expected: usize,
        /// Number of timings found
        actual: usize,
    },

    /// Chart could not be rendered.
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration file could not be parsed.
    #[error("Config error in '{path}': {message}")]
    Config {
        /// The configuration file
        path: PathBuf,
        /// The parse error message
        message: String,
    },

    /// JSON serialization/deserialization error without a file context.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Invalid input provided by the user.
    ///
    /// Covers unknown modes, malformed ratio triples, empty or duplicated
    /// sweep dimensions and zero sizes.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SweepError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
        }
    }

    /// Create a spawn error for `program`.
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            message: source.to_string(),
        }
    }

    /// Create a malformed-result error.
    pub fn malformed(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::MalformedResult {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create an invalid input error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tracesweep::error::SweepError;
    ///
    /// let err = SweepError::invalid_input("mode should be {random,ordered}");
    /// assert!(err.to_string().starts_with("Invalid input"));
    /// ```
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether this error happened while running the benchmark rather than
    /// while loading or plotting its output.
    pub fn is_invocation_failure(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::BenchmarkFailed { .. })
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(source: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = SweepError::io_error(
            "random-10:80:10-n10000-t100000-v0.json",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("random-10:80:10-n10000-t100000-v0.json"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_schema_mismatch_display() {
        let err = SweepError::SchemaMismatch {
            path: PathBuf::from("r.json"),
            expected: 32,
            actual: 31,
        };
        assert_eq!(
            err.to_string(),
            "Result 'r.json' has 31 parallel timings, expected 32"
        );
    }

    #[test]
    fn test_benchmark_failed_display() {
        let err = SweepError::BenchmarkFailed {
            command: "performance_test --mode random".to_string(),
            status: "exit status: 1".to_string(),
        };
        assert!(err.to_string().contains("exit status: 1"));
        assert!(err.is_invocation_failure());
    }

    #[test]
    fn test_invalid_input_display() {
        let err = SweepError::invalid_input("ratio triple must have three parts");
        assert_eq!(
            err.to_string(),
            "Invalid input: ratio triple must have three parts"
        );
        assert!(!err.is_invocation_failure());
    }

    #[test]
    fn test_json_format_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: SweepError = json_err.into();
        assert!(matches!(err, SweepError::JsonFormat { .. }));
    }

    #[test]
    fn test_error_cloning() {
        let err = SweepError::spawn(
            "performance_test",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
