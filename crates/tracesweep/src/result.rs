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

//! Benchmark result records.
//!
//! The benchmark executable writes one JSON record per run:
//!
//! ```json
//! { "sequential": 10.0, "parallel": [9.8, 5.1, 3.6] }
//! ```
//!
//! where position `i` of `parallel` holds the time with `i + 1` workers. The
//! explicit form `[{"workers": 1, "seconds": 9.8}, ...]` is accepted as well.
//! Both normalise to a [`BenchmarkResult`] whose timings carry their worker
//! count, so nothing downstream relies on array positions.

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default maximum result file size (64 MB).
///
/// Can be overridden via the `TRACESWEEP_MAX_RESULT_SIZE` environment
/// variable (bytes).
pub const DEFAULT_MAX_RESULT_SIZE: u64 = 64 * 1024 * 1024;

fn max_result_size() -> u64 {
    parse_max_result_size(std::env::var("TRACESWEEP_MAX_RESULT_SIZE").ok().as_deref())
}

fn parse_max_result_size(value: Option<&str>) -> u64 {
    value
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_RESULT_SIZE)
}

/// Completion time for one worker count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkerTiming {
    /// Number of workers.
    pub workers: usize,
    /// Total computation time in seconds.
    pub seconds: f64,
}

/// A validated benchmark result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    /// Single-worker baseline in seconds.
    pub sequential_seconds: f64,
    /// Parallel timings ordered by increasing worker count.
    pub timings: Vec<WorkerTiming>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawResult {
    sequential: f64,
    parallel: RawParallel,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawParallel {
    Positional(Vec<f64>),
    Explicit(Vec<WorkerTiming>),
}

impl BenchmarkResult {
    /// Parse and validate a result record.
    ///
    /// `path` is only used for error context. When `expected_workers` is
    /// set, a timing count that differs from it is a
    /// [`SweepError::SchemaMismatch`].
    pub fn from_json(content: &str, path: &Path, expected_workers: Option<usize>) -> Result<Self> {
        let raw: RawResult =
            serde_json::from_str(content).map_err(|e| SweepError::malformed(path, e.to_string()))?;

        let timings: Vec<WorkerTiming> = match raw.parallel {
            RawParallel::Positional(times) => times
                .into_iter()
                .enumerate()
                .map(|(i, seconds)| WorkerTiming {
                    workers: i + 1,
                    seconds,
                })
                .collect(),
            RawParallel::Explicit(timings) => timings,
        };

        let result = Self {
            sequential_seconds: raw.sequential,
            timings,
        };
        result.validate(path, expected_workers)?;
        Ok(result)
    }

    /// Read, parse and validate the result file at `path`.
    ///
    /// Files larger than `TRACESWEEP_MAX_RESULT_SIZE` bytes (default
    /// [`DEFAULT_MAX_RESULT_SIZE`]) are rejected without being read.
    pub fn load(path: &Path, expected_workers: Option<usize>) -> Result<Self> {
        Self::load_with_limit(path, expected_workers, max_result_size())
    }

    /// [`load`](Self::load) with an explicit size limit in bytes.
    pub fn load_with_limit(path: &Path, expected_workers: Option<usize>, max: u64) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| SweepError::io_error(path, e))?;
        if metadata.len() > max {
            return Err(SweepError::file_too_large(path, metadata.len(), max));
        }

        let content = fs::read_to_string(path).map_err(|e| SweepError::io_error(path, e))?;
        Self::from_json(&content, path, expected_workers)
    }

    fn validate(&self, path: &Path, expected_workers: Option<usize>) -> Result<()> {
        check_seconds(path, "sequential", self.sequential_seconds)?;

        if self.timings.is_empty() {
            return Err(SweepError::malformed(path, "parallel timings are empty"));
        }

        let mut previous = 0;
        for timing in &self.timings {
            if timing.workers <= previous {
                return Err(SweepError::malformed(
                    path,
                    format!(
                        "worker counts must be positive and strictly increasing (found {} after {})",
                        timing.workers, previous
                    ),
                ));
            }
            previous = timing.workers;
            check_seconds(path, &format!("parallel[{} workers]", timing.workers), timing.seconds)?;
        }

        if let Some(expected) = expected_workers {
            if self.timings.len() != expected {
                return Err(SweepError::SchemaMismatch {
                    path: path.to_path_buf(),
                    expected,
                    actual: self.timings.len(),
                });
            }
        }

        Ok(())
    }

    /// Highest worker count measured.
    pub fn max_workers(&self) -> usize {
        self.timings.last().map(|t| t.workers).unwrap_or(0)
    }
}

fn check_seconds(path: &Path, what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SweepError::malformed(
            path,
            format!("{} time {} is not a non-negative number of seconds", what, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn p() -> PathBuf {
        PathBuf::from("result.json")
    }

    fn positional(n: usize) -> String {
        let times: Vec<String> = (1..=n).map(|i| format!("{}.0", i)).collect();
        format!("{{\"sequential\": 10.0, \"parallel\": [{}]}}", times.join(", "))
    }

    #[test]
    fn test_positional_schema() {
        let result = BenchmarkResult::from_json(&positional(32), &p(), Some(32)).unwrap();
        assert_eq!(result.sequential_seconds, 10.0);
        assert_eq!(result.timings.len(), 32);
        for (i, timing) in result.timings.iter().enumerate() {
            assert_eq!(timing.workers, i + 1);
            assert_eq!(timing.seconds, (i + 1) as f64);
        }
        assert_eq!(result.max_workers(), 32);
    }

    #[test]
    fn test_integer_times_accepted() {
        let result =
            BenchmarkResult::from_json(r#"{"sequential": 10, "parallel": [1, 2]}"#, &p(), None)
                .unwrap();
        assert_eq!(result.timings[1].seconds, 2.0);
    }

    #[test]
    fn test_explicit_schema() {
        let json = r#"{"sequential": 4.0, "parallel": [
            {"workers": 1, "seconds": 4.2},
            {"workers": 2, "seconds": 2.3},
            {"workers": 8, "seconds": 0.9}
        ]}"#;
        let result = BenchmarkResult::from_json(json, &p(), None).unwrap();
        let workers: Vec<usize> = result.timings.iter().map(|t| t.workers).collect();
        assert_eq!(workers, vec![1, 2, 8]);
        assert_eq!(result.max_workers(), 8);
    }

    #[test]
    fn test_schema_mismatch_is_reported() {
        let err = BenchmarkResult::from_json(&positional(31), &p(), Some(32)).unwrap_err();
        assert!(matches!(
            err,
            SweepError::SchemaMismatch {
                expected: 32,
                actual: 31,
                ..
            }
        ));
        assert!(BenchmarkResult::from_json(&positional(31), &p(), None).is_ok());
    }

    #[test]
    fn test_missing_field() {
        let err = BenchmarkResult::from_json(r#"{"sequential": 1.0}"#, &p(), None).unwrap_err();
        assert!(matches!(err, SweepError::MalformedResult { .. }));
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            r#"{"sequential": -1.0, "parallel": [1.0]}"#,
            r#"{"sequential": 1.0, "parallel": []}"#,
            r#"{"sequential": 1.0, "parallel": [1.0, -0.5]}"#,
            r#"{"sequential": 1.0, "parallel": [{"workers": 0, "seconds": 1.0}]}"#,
            r#"{"sequential": 1.0, "parallel": [{"workers": 2, "seconds": 1.0}, {"workers": 2, "seconds": 1.0}]}"#,
            r#"{"sequential": 1.0, "parallel": [1.0], "extra": 3}"#,
            "not json",
        ];
        for case in cases {
            let err = BenchmarkResult::from_json(case, &p(), None).unwrap_err();
            assert!(
                matches!(err, SweepError::MalformedResult { .. }),
                "expected malformed for {}: {:?}",
                case,
                err
            );
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = BenchmarkResult::load(&dir.path().join("absent.json"), Some(32)).unwrap_err();
        assert!(matches!(err, SweepError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("r.json");
        fs::write(&path, positional(4)).unwrap();
        let result = BenchmarkResult::load(&path, Some(4)).unwrap();
        assert_eq!(result.timings.len(), 4);
    }

    #[test]
    fn test_load_rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("big.json");
        let content = positional(32);
        fs::write(&path, &content).unwrap();
        let size = content.len() as u64;

        let err = BenchmarkResult::load_with_limit(&path, Some(32), size - 1).unwrap_err();
        match err {
            SweepError::FileTooLarge { actual, max, .. } => {
                assert_eq!(actual, size);
                assert_eq!(max, size - 1);
            }
            other => panic!("expected FileTooLarge, got {:?}", other),
        }

        // Exactly at the limit is fine.
        let result = BenchmarkResult::load_with_limit(&path, Some(32), size).unwrap();
        assert_eq!(result.timings.len(), 32);
    }

    #[test]
    fn test_max_result_size_parsing() {
        assert_eq!(parse_max_result_size(None), DEFAULT_MAX_RESULT_SIZE);
        assert_eq!(parse_max_result_size(Some("2048")), 2048);
        assert_eq!(parse_max_result_size(Some(" 4096 ")), 4096);
        assert_eq!(parse_max_result_size(Some("not-a-number")), DEFAULT_MAX_RESULT_SIZE);
        assert_eq!(parse_max_result_size(Some("-1")), DEFAULT_MAX_RESULT_SIZE);
    }

    #[test]
    fn test_max_result_size_from_environment() {
        // Only values that never shrink the limit below the default, so
        // other tests loading files concurrently are unaffected.
        std::env::set_var("TRACESWEEP_MAX_RESULT_SIZE", "not-a-number");
        assert_eq!(max_result_size(), DEFAULT_MAX_RESULT_SIZE);

        std::env::set_var("TRACESWEEP_MAX_RESULT_SIZE", "134217728");
        assert_eq!(max_result_size(), 134_217_728);

        std::env::remove_var("TRACESWEEP_MAX_RESULT_SIZE");
        assert_eq!(max_result_size(), DEFAULT_MAX_RESULT_SIZE);
    }
}
