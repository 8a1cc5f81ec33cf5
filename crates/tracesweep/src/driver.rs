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

//! Sweep driver: one benchmark process per configuration.
//!
//! The driver turns each [`SweepConfiguration`] into a [`BenchmarkInvocation`]
//! (an explicit argument vector, never a shell string), runs it to
//! completion and moves on. Runs are strictly sequential. A failed run is
//! logged and recorded but neither retried nor allowed to stop the sweep;
//! its missing result surfaces later as a load failure in the plotter.
//!
//! The benchmark is invoked as
//!
//! ```text
//! <benchmark> --ratio <I> <S> <R> --num-keys <N> --trace-length <T> --mode <mode> --output <file>
//! ```

use crate::batch::{BatchConfig, BatchOperation, BatchProcessor, BatchResults};
use crate::config::{SweepConfiguration, SweepPlan};
use crate::error::{Result, SweepError};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info, warn};

/// A fully resolved benchmark command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkInvocation {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, passed verbatim.
    pub args: Vec<OsString>,
    /// Result file the benchmark is asked to write.
    pub output: PathBuf,
}

impl BenchmarkInvocation {
    /// Build the invocation for `config` within `plan`.
    pub fn new(config: &SweepConfiguration, plan: &SweepPlan) -> Self {
        let output = plan.result_path(config);
        let [insert, search, remove] = config.ratio.as_args();

        let args: Vec<OsString> = vec![
            "--ratio".into(),
            insert.into(),
            search.into(),
            remove.into(),
            "--num-keys".into(),
            config.max_keys.to_string().into(),
            "--trace-length".into(),
            config.trace_length.to_string().into(),
            "--mode".into(),
            config.mode.as_str().into(),
            "--output".into(),
            output.clone().into_os_string(),
        ];

        Self {
            program: plan.benchmark().to_path_buf(),
            args,
            output,
        }
    }

    /// Human-readable command line, quoted for copy-pasting into a shell.
    ///
    /// Only used for logs and listings; execution never goes through a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(|arg| quote(&arg.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Executes benchmark invocations.
pub trait BenchmarkRunner: Send + Sync {
    /// Run `invocation` and block until it exits.
    ///
    /// Returns `Err` when the process cannot be started or exits
    /// unsuccessfully.
    fn run(&self, invocation: &BenchmarkInvocation) -> Result<()>;
}

/// Spawns the benchmark as a child process with inherited stdio.
///
/// There is no timeout: a benchmark that never exits blocks the sweep.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl BenchmarkRunner for ProcessRunner {
    fn run(&self, invocation: &BenchmarkInvocation) -> Result<()> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|e| SweepError::spawn(invocation.program.display().to_string(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(SweepError::BenchmarkFailed {
                command: invocation.command_line(),
                status: status.to_string(),
            })
        }
    }
}

/// Batch operation running one benchmark per configuration.
///
/// Yields the result path the benchmark was asked to write. Whether that
/// file exists is checked by the plotter, not here.
pub struct RunOperation<'a, R: BenchmarkRunner> {
    plan: &'a SweepPlan,
    runner: &'a R,
}

impl<'a, R: BenchmarkRunner> RunOperation<'a, R> {
    pub fn new(plan: &'a SweepPlan, runner: &'a R) -> Self {
        Self { plan, runner }
    }
}

impl<R: BenchmarkRunner> BatchOperation for RunOperation<'_, R> {
    type Output = PathBuf;

    fn process(&self, config: &SweepConfiguration) -> Result<PathBuf> {
        let invocation = BenchmarkInvocation::new(config, self.plan);
        info!(command = %invocation.command_line(), "running benchmark");

        match self.runner.run(&invocation) {
            Ok(()) => {
                debug!(output = %invocation.output.display(), "benchmark finished");
                Ok(invocation.output)
            }
            Err(e) => {
                warn!(error = %e, "benchmark run failed, continuing with next configuration");
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "run"
    }

    fn allows_parallel(&self) -> bool {
        false
    }
}

/// Runs the benchmark for every configuration of a plan.
pub struct SweepDriver<'a, R: BenchmarkRunner> {
    plan: &'a SweepPlan,
    runner: &'a R,
    batch: BatchConfig,
}

impl<'a, R: BenchmarkRunner> SweepDriver<'a, R> {
    pub fn new(plan: &'a SweepPlan, runner: &'a R) -> Self {
        Self {
            plan,
            runner,
            batch: BatchConfig::default(),
        }
    }

    /// Progress settings. Parallel settings are ignored: runs are serial.
    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// The invocations the sweep will issue, in order.
    pub fn invocations(&self) -> Vec<BenchmarkInvocation> {
        self.plan
            .configurations()
            .map(|config| BenchmarkInvocation::new(&config, self.plan))
            .collect()
    }

    /// Run every configuration, one process at a time.
    ///
    /// Returns `Err` only if the plan is invalid or the results directory
    /// cannot be created; run failures are recorded per configuration.
    pub fn run(&self, show_progress: bool) -> Result<BatchResults<PathBuf>> {
        self.plan.validate()?;

        let dir = self.plan.results_dir();
        fs::create_dir_all(dir).map_err(|e| SweepError::io_error(dir, e))?;

        let configs: Vec<SweepConfiguration> = self.plan.configurations().collect();
        info!(
            configurations = configs.len(),
            benchmark = %self.plan.benchmark().display(),
            "starting sweep"
        );

        let operation = RunOperation::new(self.plan, self.runner);
        let results = BatchProcessor::new(self.batch.clone()).process(
            &configs,
            &operation,
            show_progress,
        )?;

        info!(
            succeeded = results.success_count(),
            failed = results.failure_count(),
            "sweep finished"
        );
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workload::{OperationRatio, TraceMode};
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn args_of(inv: &BenchmarkInvocation) -> Vec<String> {
        inv.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_invocation_arguments() {
        let plan = SweepPlan::default()
            .with_modes(vec![TraceMode::Random])
            .with_ratios(vec![OperationRatio::new(10, 80, 10)]);
        let config = plan.configurations().next().unwrap();
        let inv = BenchmarkInvocation::new(&config, &plan);

        assert_eq!(inv.program, PathBuf::from("performance_test"));
        assert_eq!(
            args_of(&inv),
            vec![
                "--ratio",
                "10",
                "80",
                "10",
                "--num-keys",
                "10000",
                "--trace-length",
                "100000",
                "--mode",
                "random",
                "--output",
                "random-10:80:10-n10000-t100000-v0.json",
            ]
        );
        assert_eq!(
            inv.output,
            PathBuf::from("random-10:80:10-n10000-t100000-v0.json")
        );
    }

    #[test]
    fn test_invocation_zero_slots() {
        for ratio in [OperationRatio::new(0, 100, 0), OperationRatio::new(50, 0, 50)] {
            let plan = SweepPlan::default().with_ratios(vec![ratio]);
            let config = plan.configurations().next().unwrap();
            let inv = BenchmarkInvocation::new(&config, &plan);
            let args = args_of(&inv);
            assert_eq!(&args[1..4], &ratio.as_args());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_command_line_quotes_spaces() {
        let plan = SweepPlan::default()
            .with_results_dir("my results")
            .with_modes(vec![TraceMode::Ordered]);
        let config = plan.configurations().next().unwrap();
        let line = BenchmarkInvocation::new(&config, &plan).command_line();
        assert!(line.starts_with("performance_test --ratio 10 80 10"));
        assert!(line.contains("'my results/ordered-10:80:10-n10000-t100000-v0.json'"));
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain-1:2"), "plain-1:2");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    struct Recording {
        calls: Mutex<Vec<PathBuf>>,
        fail_mode: Option<TraceMode>,
    }

    impl BenchmarkRunner for Recording {
        fn run(&self, invocation: &BenchmarkInvocation) -> Result<()> {
            self.calls.lock().unwrap().push(invocation.output.clone());
            let mode = invocation.args[9].to_string_lossy();
            if self.fail_mode.is_some_and(|m| m.as_str() == mode) {
                return Err(SweepError::BenchmarkFailed {
                    command: invocation.command_line(),
                    status: "exit status: 1".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_driver_runs_every_configuration_in_order() {
        let dir = tempdir().unwrap();
        let plan = SweepPlan::default().with_results_dir(dir.path());
        let runner = Recording {
            calls: Mutex::new(vec![]),
            fail_mode: None,
        };

        let results = SweepDriver::new(&plan, &runner).run(false).unwrap();

        let expected: Vec<PathBuf> = plan
            .configurations()
            .map(|c| plan.result_path(&c))
            .collect();
        assert_eq!(*runner.calls.lock().unwrap(), expected);
        assert_eq!(results.success_count(), 6);
    }

    #[test]
    fn test_driver_continues_after_failure() {
        let dir = tempdir().unwrap();
        let plan = SweepPlan::default().with_results_dir(dir.path());
        let runner = Recording {
            calls: Mutex::new(vec![]),
            fail_mode: Some(TraceMode::Random),
        };

        let results = SweepDriver::new(&plan, &runner).run(false).unwrap();

        assert_eq!(runner.calls.lock().unwrap().len(), 6);
        assert_eq!(results.failure_count(), 3);
        assert!(results
            .failures()
            .all(|f| f.result.as_ref().unwrap_err().is_invocation_failure()));
    }

    #[test]
    fn test_driver_creates_results_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let plan = SweepPlan::default()
            .with_modes(vec![TraceMode::Random])
            .with_results_dir(&nested);
        let runner = Recording {
            calls: Mutex::new(vec![]),
            fail_mode: None,
        };

        SweepDriver::new(&plan, &runner).run(false).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_driver_rejects_invalid_plan() {
        let plan = SweepPlan::default().with_modes(vec![]);
        let runner = Recording {
            calls: Mutex::new(vec![]),
            fail_mode: None,
        };
        assert!(SweepDriver::new(&plan, &runner).run(false).is_err());
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_process_runner_missing_program() {
        let plan = SweepPlan::default().with_benchmark("/nonexistent/tracesweep-benchmark");
        let config = plan.configurations().next().unwrap();
        let err = ProcessRunner
            .run(&BenchmarkInvocation::new(&config, &plan))
            .unwrap_err();
        assert!(matches!(err, SweepError::Spawn { .. }));
    }
}
