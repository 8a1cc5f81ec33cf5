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

//! Argument groups shared by several commands.

use clap::Args;
use std::path::PathBuf;
use tracesweep::batch::BatchConfig;
use tracesweep::naming::ChartNaming;
use tracesweep::{OperationRatio, SweepPlan, TraceMode};

/// Sweep definition: what to enumerate and where artifacts live.
///
/// Values are resolved in this order: built-in defaults, then `--config`,
/// then individual flags.
#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    /// Sweep definition file (YAML, or JSON with a .json extension)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Trace mode to sweep over (repeatable: random, ordered)
    #[arg(short, long = "mode", value_name = "MODE")]
    pub modes: Vec<TraceMode>,

    /// Insert:search:remove ratio to sweep over (repeatable, e.g. 10:80:10)
    #[arg(short, long = "ratio", value_name = "I:S:R")]
    pub ratios: Vec<OperationRatio>,

    /// Maximum number of distinct keys
    #[arg(short = 'n', long, value_name = "N")]
    pub num_keys: Option<u64>,

    /// Target number of operations per trace
    #[arg(short = 't', long, value_name = "T")]
    pub trace_length: Option<u64>,

    /// Version tag embedded in result file names
    #[arg(long, value_name = "V")]
    pub run_version: Option<u32>,

    /// Label appended to the mode to form the workload name
    #[arg(long, value_name = "LABEL")]
    pub workload_label: Option<String>,

    /// Directory for benchmark result files
    #[arg(long, value_name = "DIR")]
    pub results_dir: Option<PathBuf>,

    /// Directory for charts
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Benchmark executable
    #[arg(short, long, value_name = "PATH", env = "TRACESWEEP_BENCHMARK")]
    pub benchmark: Option<PathBuf>,

    /// Number of worker counts every result must report
    #[arg(long, value_name = "N", conflicts_with = "any_worker_count")]
    pub workers: Option<usize>,

    /// Accept results with any number of worker counts
    #[arg(long)]
    pub any_worker_count: bool,

    /// Leave key bound and trace length out of chart names and titles
    #[arg(long)]
    pub simple_names: bool,
}

impl SweepArgs {
    /// Build and validate the sweep plan.
    pub fn into_plan(self) -> Result<SweepPlan, String> {
        let mut plan = match &self.config {
            Some(path) => SweepPlan::from_file(path).map_err(|e| e.to_string())?,
            None => SweepPlan::default(),
        };

        if !self.modes.is_empty() {
            plan = plan.with_modes(self.modes);
        }
        if !self.ratios.is_empty() {
            plan = plan.with_ratios(self.ratios);
        }
        if let Some(n) = self.num_keys {
            plan = plan.with_max_keys(n).map_err(|e| e.to_string())?;
        }
        if let Some(t) = self.trace_length {
            plan = plan.with_trace_length(t).map_err(|e| e.to_string())?;
        }
        if let Some(v) = self.run_version {
            plan = plan.with_version(v);
        }
        if let Some(label) = self.workload_label {
            plan = plan.with_workload_label(label);
        }
        if let Some(dir) = self.results_dir {
            plan = plan.with_results_dir(dir);
        }
        if let Some(dir) = self.charts_dir {
            plan = plan.with_charts_dir(dir);
        }
        if let Some(program) = self.benchmark {
            plan = plan.with_benchmark(program);
        }
        if let Some(workers) = self.workers {
            plan = plan.with_expected_workers(Some(workers));
        }
        if self.any_worker_count {
            plan = plan.with_expected_workers(None);
        }
        if self.simple_names {
            plan = plan.with_chart_naming(ChartNaming::Simple);
        }

        plan.validate().map_err(|e| e.to_string())?;
        Ok(plan)
    }
}

/// Progress and output options of commands that process a sweep.
#[derive(Args, Debug, Clone, Default)]
pub struct ExecArgs {
    /// Plot charts in parallel (benchmark runs are always sequential)
    #[arg(short, long)]
    pub parallel: bool,

    /// Maximum number of plotting threads
    #[arg(short, long, value_name = "N", requires = "parallel")]
    pub jobs: Option<usize>,

    /// Show every configuration with its status
    #[arg(short, long)]
    pub verbose: bool,

    /// Write a JSON report of all configurations to FILE
    #[arg(short, long, value_name = "FILE")]
    pub summary: Option<PathBuf>,
}

impl ExecArgs {
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            parallel_threshold: if self.parallel { 1 } else { usize::MAX },
            max_threads: self.jobs,
            verbose: self.verbose,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_give_default_plan() {
        let plan = SweepArgs::default().into_plan().unwrap();
        assert_eq!(plan, SweepPlan::default());
    }

    #[test]
    fn test_overrides() {
        let args = SweepArgs {
            modes: vec![TraceMode::Ordered],
            ratios: vec![OperationRatio::new(0, 100, 0)],
            num_keys: Some(10),
            trace_length: Some(20),
            run_version: Some(4),
            any_worker_count: true,
            simple_names: true,
            ..Default::default()
        };
        let plan = args.into_plan().unwrap();
        assert_eq!(plan.modes(), &[TraceMode::Ordered]);
        assert_eq!(plan.max_keys().get(), 10);
        assert_eq!(plan.trace_length().get(), 20);
        assert_eq!(plan.version(), 4);
        assert_eq!(plan.expected_workers(), None);
        assert_eq!(plan.chart_naming(), ChartNaming::Simple);
    }

    #[test]
    fn test_invalid_plan_is_reported() {
        let args = SweepArgs {
            num_keys: Some(0),
            ..Default::default()
        };
        assert!(args.into_plan().unwrap_err().contains("max key count"));
    }

    #[test]
    fn test_batch_config_from_flags() {
        let serial = ExecArgs::default().batch_config();
        assert_eq!(serial.parallel_threshold, usize::MAX);

        let parallel = ExecArgs {
            parallel: true,
            jobs: Some(3),
            ..Default::default()
        }
        .batch_config();
        assert_eq!(parallel.parallel_threshold, 1);
        assert_eq!(parallel.max_threads, Some(3));
    }
}
