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

//! Per-configuration failure boundaries with progress reporting.
//!
//! Every phase of a sweep (running the benchmark, plotting its result) is a
//! [`BatchOperation`] applied to each [`SweepConfiguration`] of a plan. The
//! [`BatchProcessor`] calls the operation once per configuration, records the
//! outcome and moves on, so one failed configuration never stops the others.
//!
//! Processing is serial unless the batch is at least `parallel_threshold`
//! configurations long *and* the operation allows parallel execution. The
//! benchmark driver never does: it must issue one process at a time.
//!
//! # Examples
//!
//! ```rust
//! use tracesweep::batch::{BatchConfig, BatchOperation, BatchProcessor};
//! use tracesweep::config::{SweepConfiguration, SweepPlan};
//! use tracesweep::error::SweepError;
//!
//! struct Describe;
//!
//! impl BatchOperation for Describe {
//!     type Output = String;
//!
//!     fn process(&self, config: &SweepConfiguration) -> Result<String, SweepError> {
//!         Ok(format!("{} {}", config.mode, config.ratio))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "describe"
//!     }
//! }
//!
//! let plan = SweepPlan::default();
//! let configs: Vec<_> = plan.configurations().collect();
//! let results = BatchProcessor::new(BatchConfig::default())
//!     .process(&configs, &Describe, false)
//!     .unwrap();
//! assert_eq!(results.success_count(), 6);
//! ```

use crate::config::SweepConfiguration;
use crate::error::{Result, SweepError};
use crate::naming::result_file_name;
use colored::Colorize;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Batch processing settings.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum batch length for parallel processing.
    ///
    /// Default: `usize::MAX` (always serial).
    pub parallel_threshold: usize,

    /// Maximum number of threads for parallel processing.
    ///
    /// None means Rayon's default (number of CPU cores).
    pub max_threads: Option<usize>,

    /// Number of items between progress updates. 0 disables them.
    pub progress_interval: usize,

    /// Print every item with its status.
    pub verbose: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: usize::MAX,
            max_threads: None,
            progress_interval: 1,
            verbose: false,
        }
    }
}

/// Outcome of one configuration.
#[derive(Debug, Clone)]
pub struct ItemResult<T> {
    /// The configuration that was processed.
    pub config: SweepConfiguration,
    /// The result of processing it.
    pub result: Result<T>,
}

impl<T> ItemResult<T> {
    pub fn success(config: SweepConfiguration, value: T) -> Self {
        Self {
            config,
            result: Ok(value),
        }
    }

    pub fn failure(config: SweepConfiguration, error: SweepError) -> Self {
        Self {
            config,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Aggregated outcomes of a batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results for each configuration.
    pub results: Vec<ItemResult<T>>,
    /// Total processing time in milliseconds.
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    pub fn new(results: Vec<ItemResult<T>>, elapsed_ms: u128) -> Self {
        Self {
            results,
            elapsed_ms,
        }
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.is_success())
    }

    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    pub fn successes(&self) -> impl Iterator<Item = &ItemResult<T>> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemResult<T>> {
        self.results.iter().filter(|r| r.is_failure())
    }
}

/// One phase of a sweep, applied to each configuration.
pub trait BatchOperation: Send + Sync {
    /// Value produced for a successful configuration.
    type Output: Send;

    /// Process a single configuration.
    fn process(&self, config: &SweepConfiguration) -> Result<Self::Output>;

    /// Name used in progress output and logs.
    fn name(&self) -> &str;

    /// Whether configurations may be processed concurrently.
    fn allows_parallel(&self) -> bool {
        true
    }
}

/// Progress tracker with lock-free counters.
#[derive(Debug)]
struct ProgressTracker {
    total: usize,
    processed: AtomicUsize,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
    interval: usize,
    verbose: bool,
    start_time: Instant,
}

impl ProgressTracker {
    fn new(total: usize, interval: usize, verbose: bool) -> Self {
        Self {
            total,
            processed: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            interval,
            verbose,
            start_time: Instant::now(),
        }
    }

    fn record_success(&self, label: &str) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.succeeded.fetch_add(1, Ordering::Relaxed);

        if self.should_report(processed) {
            self.report_progress(label, true);
        }
    }

    fn record_failure(&self, label: &str, error: &SweepError) {
        let processed = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.failed.fetch_add(1, Ordering::Relaxed);

        if self.verbose {
            eprintln!("{} {} - {}", "✗".red().bold(), label, error);
        }

        if self.should_report(processed) {
            self.report_progress(label, false);
        }
    }

    fn should_report(&self, processed: usize) -> bool {
        self.interval > 0 && (processed % self.interval == 0 || processed == self.total)
    }

    fn report_progress(&self, current: &str, success: bool) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);

        if self.verbose {
            let status = if success {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            eprintln!("{} [{}/{}] {}", status, processed, self.total, current);
        } else {
            eprintln!(
                "Progress: [{}/{}] {} succeeded, {} failed",
                processed, self.total, succeeded, failed
            );
        }
    }

    fn print_summary(&self, operation_name: &str) {
        let processed = self.processed.load(Ordering::Relaxed);
        let succeeded = self.succeeded.load(Ordering::Relaxed);
        let failed = self.failed.load(Ordering::Relaxed);
        let elapsed = self.start_time.elapsed();

        println!();
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "{} {}",
            "Sweep Phase:".bright_blue().bold(),
            operation_name.bright_white()
        );
        println!("{}", "═".repeat(60).bright_blue());
        println!(
            "  {} {}",
            "Configurations:".bright_cyan(),
            processed.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Succeeded:".green().bold(),
            succeeded.to_string().bright_white()
        );
        println!(
            "  {} {}",
            "Failed:".red().bold(),
            failed.to_string().bright_white()
        );
        println!(
            "  {} {:.2}s",
            "Elapsed:".bright_cyan(),
            elapsed.as_secs_f64()
        );
        println!("{}", "═".repeat(60).bright_blue());
    }
}

/// Applies a [`BatchOperation`] to every configuration of a sweep.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Process every configuration, collecting all outcomes.
    ///
    /// Failures of individual configurations are recorded in the returned
    /// [`BatchResults`]; `Err` is only returned when a dedicated thread pool
    /// cannot be built.
    pub fn process<O>(
        &self,
        configs: &[SweepConfiguration],
        operation: &O,
        show_progress: bool,
    ) -> Result<BatchResults<O::Output>>
    where
        O: BatchOperation,
    {
        let start_time = Instant::now();

        if configs.is_empty() {
            return Ok(BatchResults::new(vec![], 0));
        }

        let tracker = show_progress.then(|| {
            ProgressTracker::new(
                configs.len(),
                self.config.progress_interval,
                self.config.verbose,
            )
        });

        let parallel =
            operation.allows_parallel() && configs.len() >= self.config.parallel_threshold;

        let results = if parallel {
            match self.config.max_threads {
                Some(threads) => rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()
                    .map_err(|e| SweepError::invalid_input(format!("thread pool: {}", e)))?
                    .install(|| Self::process_parallel(configs, operation, tracker.as_ref())),
                None => Self::process_parallel(configs, operation, tracker.as_ref()),
            }
        } else {
            Self::process_serial(configs, operation, tracker.as_ref())
        };

        if let Some(tracker) = tracker {
            tracker.print_summary(operation.name());
        }

        Ok(BatchResults::new(results, start_time.elapsed().as_millis()))
    }

    fn process_one<O>(
        config: &SweepConfiguration,
        operation: &O,
        tracker: Option<&ProgressTracker>,
    ) -> ItemResult<O::Output>
    where
        O: BatchOperation,
    {
        let result = operation.process(config);

        if let Some(t) = tracker {
            let label = result_file_name(config);
            match &result {
                Ok(_) => t.record_success(&label),
                Err(e) => t.record_failure(&label, e),
            }
        }

        ItemResult {
            config: *config,
            result,
        }
    }

    fn process_serial<O>(
        configs: &[SweepConfiguration],
        operation: &O,
        tracker: Option<&ProgressTracker>,
    ) -> Vec<ItemResult<O::Output>>
    where
        O: BatchOperation,
    {
        configs
            .iter()
            .map(|config| Self::process_one(config, operation, tracker))
            .collect()
    }

    fn process_parallel<O>(
        configs: &[SweepConfiguration],
        operation: &O,
        tracker: Option<&ProgressTracker>,
    ) -> Vec<ItemResult<O::Output>>
    where
        O: BatchOperation,
    {
        configs
            .par_iter()
            .map(|config| Self::process_one(config, operation, tracker))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SweepPlan;
    use crate::workload::TraceMode;
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    fn configs() -> Vec<SweepConfiguration> {
        SweepPlan::default().configurations().collect()
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert_eq!(config.parallel_threshold, usize::MAX);
        assert!(config.max_threads.is_none());
        assert_eq!(config.progress_interval, 1);
        assert!(!config.verbose);
    }

    #[test]
    fn test_batch_results_statistics() {
        let c = configs();
        let results = vec![
            ItemResult::success(c[0], ()),
            ItemResult::success(c[1], ()),
            ItemResult::failure(c[2], SweepError::invalid_input("boom")),
        ];
        let batch = BatchResults::new(results, 10);

        assert_eq!(batch.total(), 3);
        assert_eq!(batch.success_count(), 2);
        assert_eq!(batch.failure_count(), 1);
        assert!(!batch.all_succeeded());
        assert!(batch.has_failures());
        assert_eq!(batch.failures().next().unwrap().config, c[2]);
    }

    #[test]
    fn test_progress_tracker_should_report() {
        let tracker = ProgressTracker::new(100, 10, false);
        assert!(!tracker.should_report(1));
        assert!(tracker.should_report(10));
        assert!(tracker.should_report(100));

        let silent = ProgressTracker::new(5, 0, false);
        assert!(!silent.should_report(5));
    }

    /// Fails every ordered-mode configuration.
    struct FailOrdered;

    impl BatchOperation for FailOrdered {
        type Output = String;

        fn process(&self, config: &SweepConfiguration) -> Result<String> {
            match config.mode {
                TraceMode::Ordered => Err(SweepError::invalid_input("ordered")),
                TraceMode::Random => Ok(result_file_name(config)),
            }
        }

        fn name(&self) -> &str {
            "fail-ordered"
        }
    }

    #[test]
    fn test_failures_are_isolated() {
        let results = BatchProcessor::default()
            .process(&configs(), &FailOrdered, false)
            .unwrap();

        assert_eq!(results.total(), 6);
        assert_eq!(results.success_count(), 3);
        assert_eq!(results.failure_count(), 3);
        // Input order is preserved.
        assert!(results.results[..3].iter().all(|r| r.is_success()));
        assert!(results.results[3..].iter().all(|r| r.is_failure()));
    }

    #[test]
    fn test_empty_batch() {
        let results = BatchProcessor::default()
            .process(&[], &FailOrdered, false)
            .unwrap();
        assert_eq!(results.total(), 0);
        assert!(results.all_succeeded());
    }

    struct RecordThreads {
        serial_only: bool,
        seen: Mutex<Vec<ThreadId>>,
    }

    impl BatchOperation for RecordThreads {
        type Output = ();

        fn process(&self, _config: &SweepConfiguration) -> Result<()> {
            self.seen.lock().unwrap().push(thread::current().id());
            Ok(())
        }

        fn name(&self) -> &str {
            "record"
        }

        fn allows_parallel(&self) -> bool {
            !self.serial_only
        }
    }

    #[test]
    fn test_serial_only_operation_stays_on_caller_thread() {
        let processor = BatchProcessor::new(BatchConfig {
            parallel_threshold: 1,
            ..Default::default()
        });
        let op = RecordThreads {
            serial_only: true,
            seen: Mutex::new(vec![]),
        };

        processor.process(&configs(), &op, false).unwrap();

        let me = thread::current().id();
        let seen = op.seen.into_inner().unwrap();
        assert_eq!(seen.len(), 6);
        assert!(seen.iter().all(|id| *id == me));
    }

    #[test]
    fn test_parallel_with_thread_limit() {
        let processor = BatchProcessor::new(BatchConfig {
            parallel_threshold: 1,
            max_threads: Some(2),
            ..Default::default()
        });
        let op = RecordThreads {
            serial_only: false,
            seen: Mutex::new(vec![]),
        };

        let results = processor.process(&configs(), &op, false).unwrap();
        assert_eq!(results.success_count(), 6);
    }
}
