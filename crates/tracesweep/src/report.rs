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

//! Per-configuration sweep report.
//!
//! A [`SweepReport`] collects, for every configuration of a plan, the result
//! file it maps to and what happened in each phase that ran. It can be
//! printed or exported as JSON.

use crate::batch::BatchResults;
use crate::config::{SweepConfiguration, SweepPlan};
use crate::error::{Result, SweepError};
use crate::plotter::PlotArtifact;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one phase for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepOutcome {
    Ok,
    Failed { error: String },
}

impl StepOutcome {
    fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => StepOutcome::Ok,
            Err(e) => StepOutcome::Failed {
                error: e.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, StepOutcome::Ok)
    }
}

/// Report line for one configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub configuration: SweepConfiguration,
    pub result_file: PathBuf,
    /// `None` when the run phase was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<StepOutcome>,
    /// `None` when the plot phase was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<PathBuf>,
}

impl ReportEntry {
    /// Whether every phase that ran succeeded.
    pub fn succeeded(&self) -> bool {
        self.run.as_ref().map_or(true, StepOutcome::is_ok)
            && self.plot.as_ref().map_or(true, StepOutcome::is_ok)
    }
}

/// Outcome of a sweep, in enumeration order.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub version: u32,
    pub entries: Vec<ReportEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_elapsed_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_elapsed_ms: Option<u128>,
}

impl SweepReport {
    /// Empty report with one entry per configuration of `plan`.
    pub fn new(plan: &SweepPlan) -> Self {
        Self {
            version: plan.version(),
            entries: plan
                .configurations()
                .map(|configuration| ReportEntry {
                    result_file: plan.result_path(&configuration),
                    configuration,
                    run: None,
                    plot: None,
                    chart: None,
                })
                .collect(),
            run_elapsed_ms: None,
            plot_elapsed_ms: None,
        }
    }

    fn entry_mut(&mut self, config: &SweepConfiguration) -> Option<&mut ReportEntry> {
        self.entries.iter_mut().find(|e| e.configuration == *config)
    }

    /// Record the outcome of the run phase.
    pub fn record_runs(&mut self, runs: &BatchResults<PathBuf>) {
        for item in &runs.results {
            if let Some(entry) = self.entry_mut(&item.config) {
                entry.run = Some(StepOutcome::from_result(&item.result));
            }
        }
        self.run_elapsed_ms = Some(runs.elapsed_ms);
    }

    /// Record the outcome of the plot phase.
    pub fn record_plots(&mut self, plots: &BatchResults<PlotArtifact>) {
        for item in &plots.results {
            if let Some(entry) = self.entry_mut(&item.config) {
                entry.plot = Some(StepOutcome::from_result(&item.result));
                entry.chart = item.result.as_ref().ok().map(|a| a.path.clone());
            }
        }
        self.plot_elapsed_ms = Some(plots.elapsed_ms);
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Number of configurations that produced a chart.
    pub fn chart_count(&self) -> usize {
        self.entries.iter().filter(|e| e.chart.is_some()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.succeeded())
    }

    pub fn all_succeeded(&self) -> bool {
        self.entries.iter().all(ReportEntry::succeeded)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report as pretty JSON.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SweepError::io_error(path, e))
    }

    /// Print failed configurations to stderr.
    pub fn print_failures(&self) {
        if self.all_succeeded() {
            return;
        }

        eprintln!();
        eprintln!("{}", "Failed configurations:".red().bold());
        for entry in self.failures() {
            eprintln!("  {} {}", "✗".red(), entry.result_file.display());
            for outcome in [&entry.run, &entry.plot].into_iter().flatten() {
                if let StepOutcome::Failed { error } = outcome {
                    eprintln!("    {}", error.dimmed());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::ItemResult;
    use crate::workload::TraceMode;

    #[test]
    fn test_new_report_lists_configurations() {
        let plan = SweepPlan::default();
        let report = SweepReport::new(&plan);
        assert_eq!(report.total(), 6);
        assert!(report.all_succeeded());
        assert_eq!(report.chart_count(), 0);
        assert_eq!(
            report.entries[0].result_file,
            PathBuf::from("random-10:80:10-n10000-t100000-v0.json")
        );
    }

    #[test]
    fn test_record_runs_and_json() {
        let plan = SweepPlan::default().with_modes(vec![TraceMode::Ordered]);
        let configs: Vec<_> = plan.configurations().collect();
        let runs = BatchResults::new(
            vec![
                ItemResult::success(configs[0], plan.result_path(&configs[0])),
                ItemResult::failure(
                    configs[1],
                    SweepError::BenchmarkFailed {
                        command: "performance_test".into(),
                        status: "exit status: 2".into(),
                    },
                ),
                ItemResult::success(configs[2], plan.result_path(&configs[2])),
            ],
            5,
        );

        let mut report = SweepReport::new(&plan);
        report.record_runs(&runs);

        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["entries"][0]["run"]["status"], "ok");
        assert_eq!(json["entries"][1]["run"]["status"], "failed");
        assert_eq!(json["entries"][1]["configuration"]["ratio"], "33:33:33");
        assert_eq!(json["entries"][1]["configuration"]["mode"], "ordered");
        assert!(json["entries"][0].get("plot").is_none());
        assert_eq!(json["run_elapsed_ms"], 5);
    }
}
