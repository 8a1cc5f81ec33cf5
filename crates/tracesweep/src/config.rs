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

//! Sweep configuration.
//!
//! A [`SweepPlan`] is the immutable description of a whole sweep: which
//! modes and ratio triples to enumerate, the fixed key bound and trace
//! length, the version tag and where artifacts go. It is constructed once
//! (from defaults, a config file and command-line overrides) and passed by
//! reference to the driver and the plotter.
//!
//! A [`SweepConfiguration`] is one point of the sweep and fully determines a
//! single benchmark invocation and the name of its result file.
//!
//! # Example
//!
//! ```
//! use tracesweep::config::SweepPlan;
//! use tracesweep::workload::{OperationRatio, TraceMode};
//!
//! let plan = SweepPlan::default()
//!     .with_modes(vec![TraceMode::Random])
//!     .with_ratios(vec![OperationRatio::new(10, 80, 10)]);
//! assert_eq!(plan.configurations().count(), 1);
//! ```

use crate::error::{Result, SweepError};
use crate::naming::{check_name_part, result_file_name, ChartNaming};
use crate::workload::{OperationRatio, TraceMode};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Default key bound passed to `--num-keys`.
pub const DEFAULT_MAX_KEYS: u64 = 10_000;

/// Default trace length passed to `--trace-length`.
pub const DEFAULT_TRACE_LENGTH: u64 = 100_000;

/// Default benchmark executable, resolved through `PATH`.
pub const DEFAULT_BENCHMARK: &str = "performance_test";

/// Number of worker counts the benchmark reports (1..=32).
pub const DEFAULT_EXPECTED_WORKERS: usize = 32;

/// Default label appended to the mode to form the workload name.
pub const DEFAULT_WORKLOAD_LABEL: &str = "operators";

/// Default ratio triples (insert:search:remove).
pub const DEFAULT_RATIOS: [OperationRatio; 3] = [
    OperationRatio::new(10, 80, 10),
    OperationRatio::new(33, 33, 33),
    OperationRatio::new(50, 0, 50),
];

fn nonzero(value: u64, what: &str) -> Result<NonZeroU64> {
    NonZeroU64::new(value)
        .ok_or_else(|| SweepError::invalid_input(format!("{} must be positive", what)))
}

/// One point of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SweepConfiguration {
    /// Key ordering of the trace.
    pub mode: TraceMode,
    /// Operation mix.
    pub ratio: OperationRatio,
    /// Upper bound on distinct keys.
    pub max_keys: NonZeroU64,
    /// Target number of operations.
    pub trace_length: NonZeroU64,
    /// Disambiguates repeated sweeps in result file names.
    pub version: u32,
}

impl SweepConfiguration {
    /// Create a configuration, rejecting zero sizes.
    pub fn new(
        mode: TraceMode,
        ratio: OperationRatio,
        max_keys: u64,
        trace_length: u64,
        version: u32,
    ) -> Result<Self> {
        Ok(Self {
            mode,
            ratio,
            max_keys: nonzero(max_keys, "max key count")?,
            trace_length: nonzero(trace_length, "trace length")?,
            version,
        })
    }

    /// Workload name used in chart titles and chart file names.
    pub fn workload_name(&self, label: &str) -> String {
        format!("{} {}", self.mode, label)
    }
}

/// Immutable description of a whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPlan {
    modes: Vec<TraceMode>,
    ratios: Vec<OperationRatio>,
    max_keys: NonZeroU64,
    trace_length: NonZeroU64,
    version: u32,
    workload_label: String,
    results_dir: PathBuf,
    charts_dir: PathBuf,
    benchmark: PathBuf,
    expected_workers: Option<usize>,
    chart_naming: ChartNaming,
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            modes: TraceMode::ALL.to_vec(),
            ratios: DEFAULT_RATIOS.to_vec(),
            max_keys: NonZeroU64::new(DEFAULT_MAX_KEYS).unwrap_or(NonZeroU64::MIN),
            trace_length: NonZeroU64::new(DEFAULT_TRACE_LENGTH).unwrap_or(NonZeroU64::MIN),
            version: 0,
            workload_label: DEFAULT_WORKLOAD_LABEL.to_string(),
            results_dir: PathBuf::from("."),
            charts_dir: PathBuf::from("."),
            benchmark: PathBuf::from(DEFAULT_BENCHMARK),
            expected_workers: Some(DEFAULT_EXPECTED_WORKERS),
            chart_naming: ChartNaming::Sweep,
        }
    }
}

impl SweepPlan {
    /// Load a plan from a YAML or JSON file, filling gaps with defaults.
    ///
    /// Files ending in `.json` are parsed as JSON; everything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| SweepError::io_error(path, e))?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let file: PlanFile = if is_json {
            serde_json::from_str(&content).map_err(|e| SweepError::config(path, e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| SweepError::config(path, e.to_string()))?
        };

        file.apply(Self::default())
            .map_err(|e| SweepError::config(path, e.to_string()))
    }

    /// Modes, in enumeration order.
    pub fn modes(&self) -> &[TraceMode] {
        &self.modes
    }

    /// Ratio triples, in enumeration order.
    pub fn ratios(&self) -> &[OperationRatio] {
        &self.ratios
    }

    pub fn max_keys(&self) -> NonZeroU64 {
        self.max_keys
    }

    pub fn trace_length(&self) -> NonZeroU64 {
        self.trace_length
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn workload_label(&self) -> &str {
        &self.workload_label
    }

    /// Directory holding benchmark result files.
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Where the benchmark writes the result of `config`.
    ///
    /// Both the driver and the plotter resolve result files through this
    /// method. The default results directory `.` yields a bare file name.
    pub fn result_path(&self, config: &SweepConfiguration) -> PathBuf {
        let name = result_file_name(config);
        if self.results_dir.as_os_str().is_empty() || self.results_dir == Path::new(".") {
            PathBuf::from(name)
        } else {
            self.results_dir.join(name)
        }
    }

    /// Directory charts are written to.
    pub fn charts_dir(&self) -> &Path {
        &self.charts_dir
    }

    /// Benchmark executable.
    pub fn benchmark(&self) -> &Path {
        &self.benchmark
    }

    /// Number of parallel timings each result must carry, if enforced.
    pub fn expected_workers(&self) -> Option<usize> {
        self.expected_workers
    }

    pub fn chart_naming(&self) -> ChartNaming {
        self.chart_naming
    }

    pub fn with_modes(mut self, modes: Vec<TraceMode>) -> Self {
        self.modes = modes;
        self
    }

    pub fn with_ratios(mut self, ratios: Vec<OperationRatio>) -> Self {
        self.ratios = ratios;
        self
    }

    pub fn with_max_keys(mut self, max_keys: u64) -> Result<Self> {
        self.max_keys = nonzero(max_keys, "max key count")?;
        Ok(self)
    }

    pub fn with_trace_length(mut self, trace_length: u64) -> Result<Self> {
        self.trace_length = nonzero(trace_length, "trace length")?;
        Ok(self)
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_workload_label(mut self, label: impl Into<String>) -> Self {
        self.workload_label = label.into();
        self
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    pub fn with_charts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.charts_dir = dir.into();
        self
    }

    pub fn with_benchmark(mut self, program: impl Into<PathBuf>) -> Self {
        self.benchmark = program.into();
        self
    }

    pub fn with_expected_workers(mut self, expected: Option<usize>) -> Self {
        self.expected_workers = expected;
        self
    }

    pub fn with_chart_naming(mut self, naming: ChartNaming) -> Self {
        self.chart_naming = naming;
        self
    }

    /// Check the plan before running anything.
    ///
    /// Rejects empty sweep dimensions, duplicated modes or ratios (two
    /// configurations would then share a result file), all-zero ratio
    /// triples, workload labels that are not usable in file names and an
    /// expected worker count of zero.
    pub fn validate(&self) -> Result<()> {
        if self.modes.is_empty() {
            return Err(SweepError::invalid_input("at least one mode is required"));
        }
        if self.ratios.is_empty() {
            return Err(SweepError::invalid_input(
                "at least one ratio triple is required",
            ));
        }

        let mut seen_modes = HashSet::new();
        for mode in &self.modes {
            if !seen_modes.insert(mode) {
                return Err(SweepError::invalid_input(format!(
                    "mode '{}' is listed more than once",
                    mode
                )));
            }
        }

        let mut seen_ratios = HashSet::new();
        for ratio in &self.ratios {
            if ratio.is_empty() {
                return Err(SweepError::invalid_input(format!(
                    "ratio '{}' has no operations",
                    ratio
                )));
            }
            if !seen_ratios.insert(ratio) {
                return Err(SweepError::invalid_input(format!(
                    "ratio '{}' is listed more than once",
                    ratio
                )));
            }
        }

        check_name_part("workload label", &self.workload_label)?;

        if self.expected_workers == Some(0) {
            return Err(SweepError::invalid_input(
                "expected worker count must be positive",
            ));
        }

        Ok(())
    }

    /// Enumerate the sweep: outer loop over modes, inner loop over ratios.
    pub fn configurations(&self) -> impl Iterator<Item = SweepConfiguration> + '_ {
        self.modes.iter().flat_map(move |&mode| {
            self.ratios.iter().map(move |&ratio| SweepConfiguration {
                mode,
                ratio,
                max_keys: self.max_keys,
                trace_length: self.trace_length,
                version: self.version,
            })
        })
    }

    /// Number of configurations in the sweep.
    pub fn len(&self) -> usize {
        self.modes.len() * self.ratios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// On-disk plan. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PlanFile {
    modes: Option<Vec<TraceMode>>,
    ratios: Option<Vec<OperationRatio>>,
    max_keys: Option<u64>,
    trace_length: Option<u64>,
    version: Option<u32>,
    workload_label: Option<String>,
    results_dir: Option<PathBuf>,
    charts_dir: Option<PathBuf>,
    benchmark: Option<PathBuf>,
    expected_workers: Option<usize>,
    any_worker_count: Option<bool>,
    chart_naming: Option<ChartNaming>,
}

impl PlanFile {
    fn apply(self, mut plan: SweepPlan) -> Result<SweepPlan> {
        if let Some(modes) = self.modes {
            plan = plan.with_modes(modes);
        }
        if let Some(ratios) = self.ratios {
            plan = plan.with_ratios(ratios);
        }
        if let Some(n) = self.max_keys {
            plan = plan.with_max_keys(n)?;
        }
        if let Some(t) = self.trace_length {
            plan = plan.with_trace_length(t)?;
        }
        if let Some(v) = self.version {
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
        if let Some(expected) = self.expected_workers {
            plan = plan.with_expected_workers(Some(expected));
        }
        if self.any_worker_count == Some(true) {
            plan = plan.with_expected_workers(None);
        }
        if let Some(naming) = self.chart_naming {
            plan = plan.with_chart_naming(naming);
        }
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_plan() {
        let plan = SweepPlan::default();
        assert_eq!(plan.modes(), &[TraceMode::Random, TraceMode::Ordered]);
        assert_eq!(plan.ratios(), &DEFAULT_RATIOS);
        assert_eq!(plan.max_keys().get(), 10_000);
        assert_eq!(plan.trace_length().get(), 100_000);
        assert_eq!(plan.version(), 0);
        assert_eq!(plan.expected_workers(), Some(32));
        assert!(plan.validate().is_ok());
        assert_eq!(plan.len(), 6);
    }

    #[test]
    fn test_enumeration_order() {
        let plan = SweepPlan::default();
        let order: Vec<(TraceMode, OperationRatio)> =
            plan.configurations().map(|c| (c.mode, c.ratio)).collect();

        assert_eq!(
            order,
            vec![
                (TraceMode::Random, DEFAULT_RATIOS[0]),
                (TraceMode::Random, DEFAULT_RATIOS[1]),
                (TraceMode::Random, DEFAULT_RATIOS[2]),
                (TraceMode::Ordered, DEFAULT_RATIOS[0]),
                (TraceMode::Ordered, DEFAULT_RATIOS[1]),
                (TraceMode::Ordered, DEFAULT_RATIOS[2]),
            ]
        );
    }

    #[test]
    fn test_enumeration_is_reproducible() {
        let plan = SweepPlan::default();
        let first: Vec<_> = plan.configurations().collect();
        let second: Vec<_> = plan.configurations().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_configurations_carry_plan_sizes() {
        let plan = SweepPlan::default()
            .with_max_keys(64)
            .unwrap()
            .with_trace_length(512)
            .unwrap()
            .with_version(3);

        for config in plan.configurations() {
            assert_eq!(config.max_keys.get(), 64);
            assert_eq!(config.trace_length.get(), 512);
            assert_eq!(config.version, 3);
        }
    }

    #[test]
    fn test_zero_sizes_rejected() {
        assert!(SweepPlan::default().with_max_keys(0).is_err());
        assert!(SweepPlan::default().with_trace_length(0).is_err());
        assert!(
            SweepConfiguration::new(TraceMode::Random, DEFAULT_RATIOS[0], 0, 1, 0).is_err()
        );
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let plan = SweepPlan::default().with_modes(vec![TraceMode::Random, TraceMode::Random]);
        assert!(plan.validate().is_err());

        let plan = SweepPlan::default()
            .with_ratios(vec![OperationRatio::new(1, 1, 1), OperationRatio::new(1, 1, 1)]);
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_dimensions() {
        assert!(SweepPlan::default().with_modes(vec![]).validate().is_err());
        assert!(SweepPlan::default().with_ratios(vec![]).validate().is_err());
        assert!(SweepPlan::default()
            .with_ratios(vec![OperationRatio::new(0, 0, 0)])
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_accepts_zero_slot_ratios() {
        let plan = SweepPlan::default().with_ratios(vec![
            OperationRatio::new(0, 100, 0),
            OperationRatio::new(50, 0, 50),
        ]);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_label() {
        assert!(SweepPlan::default()
            .with_workload_label("a/b")
            .validate()
            .is_err());
        assert!(SweepPlan::default().with_workload_label(" ").validate().is_err());
    }

    #[test]
    fn test_result_path() {
        let plan = SweepPlan::default().with_modes(vec![TraceMode::Random]);
        let config = plan.configurations().next().unwrap();
        assert_eq!(
            plan.result_path(&config),
            PathBuf::from("random-10:80:10-n10000-t100000-v0.json")
        );

        let plan = plan.with_results_dir("out");
        assert_eq!(
            plan.result_path(&config),
            Path::new("out").join("random-10:80:10-n10000-t100000-v0.json")
        );
    }

    #[test]
    fn test_workload_name() {
        let config =
            SweepConfiguration::new(TraceMode::Random, DEFAULT_RATIOS[0], 10, 10, 0).unwrap();
        assert_eq!(config.workload_name("operators"), "random operators");
    }

    #[test]
    fn test_from_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        fs::write(
            &path,
            "modes: [ordered]\nratios: [\"0:100:0\", [50, 0, 50]]\nmax_keys: 500\nversion: 2\n",
        )
        .unwrap();

        let plan = SweepPlan::from_file(&path).unwrap();
        assert_eq!(plan.modes(), &[TraceMode::Ordered]);
        assert_eq!(
            plan.ratios(),
            &[OperationRatio::new(0, 100, 0), OperationRatio::new(50, 0, 50)]
        );
        assert_eq!(plan.max_keys().get(), 500);
        assert_eq!(plan.trace_length().get(), DEFAULT_TRACE_LENGTH);
        assert_eq!(plan.version(), 2);
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.json");
        fs::write(&path, r#"{"any_worker_count": true, "chart_naming": "simple"}"#).unwrap();

        let plan = SweepPlan::from_file(&path).unwrap();
        assert_eq!(plan.expected_workers(), None);
        assert_eq!(plan.chart_naming(), ChartNaming::Simple);
    }

    #[test]
    fn test_from_file_rejects_unknown_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        fs::write(&path, "threads: 4\n").unwrap();

        let err = SweepPlan::from_file(&path).unwrap_err();
        assert!(matches!(err, SweepError::Config { .. }));
    }

    #[test]
    fn test_from_file_zero_size_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sweep.yaml");
        fs::write(&path, "trace_length: 0\n").unwrap();

        let err = SweepPlan::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("trace length must be positive"));
    }
}
