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

//! Result plotter: one scaling chart per configuration.
//!
//! For each configuration the plotter resolves the result file through
//! [`SweepPlan::result_path`] (the same derivation the driver used), loads
//! and validates it, and saves a chart comparing the sequential baseline
//! with the parallel time at each worker count.
//!
//! Two call modes share this contract: sweep charts carry the key bound and
//! trace length in their title and name, simple charts
//! ([`plot_single`]) omit them.

use crate::batch::{BatchConfig, BatchOperation, BatchProcessor, BatchResults};
use crate::chart::{save_chart, Chart, ChartBackend, LineStyle, ReferenceLine, Series};
use crate::config::{SweepConfiguration, SweepPlan};
use crate::error::Result;
use crate::naming::{chart_stem, chart_title, check_name_part, ChartSizes};
use crate::result::BenchmarkResult;
use crate::workload::OperationRatio;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// X axis label.
pub const X_LABEL: &str = "Number of Workers";

/// Y axis label.
pub const Y_LABEL: &str = "Total Computation Time [s]";

/// A chart written to disk.
#[derive(Debug, Clone)]
pub struct PlotArtifact {
    /// File the chart was written to.
    pub path: PathBuf,
    /// Chart name without extension.
    pub stem: String,
    /// What was drawn.
    pub chart: Chart,
}

/// Build the comparison chart for one result.
pub fn build_chart(
    workload: &str,
    ratio: &OperationRatio,
    sizes: Option<ChartSizes>,
    result: &BenchmarkResult,
) -> Chart {
    Chart {
        title_lines: chart_title(workload, ratio, sizes),
        x_label: X_LABEL.to_string(),
        y_label: Y_LABEL.to_string(),
        reference: ReferenceLine {
            label: "Sequential".to_string(),
            value: result.sequential_seconds,
            style: LineStyle::Dashed,
        },
        series: Series {
            label: "Parallel".to_string(),
            points: result
                .timings
                .iter()
                .map(|t| (t.workers as f64, t.seconds))
                .collect(),
            style: LineStyle::Solid,
        },
    }
}

/// Plot a single result file outside of a sweep.
///
/// The chart is named `{workload}-{I}:{S}:{R}`, with `-n{N}-t{T}` appended
/// when `sizes` is given. The workload name obeys the same rules as a sweep's
/// workload label.
pub fn plot_single(
    result_path: &Path,
    workload: &str,
    ratio: &OperationRatio,
    sizes: Option<ChartSizes>,
    expected_workers: Option<usize>,
    backend: &dyn ChartBackend,
    charts_dir: &Path,
) -> Result<PlotArtifact> {
    check_name_part("workload name", workload)?;
    let result = BenchmarkResult::load(result_path, expected_workers)?;
    let chart = build_chart(workload, ratio, sizes, &result);
    let stem = chart_stem(workload, ratio, sizes);
    let path = save_chart(backend, &chart, charts_dir, &stem)?;

    info!(chart = %path.display(), result = %result_path.display(), "chart written");
    Ok(PlotArtifact { path, stem, chart })
}

/// Plots the results of a sweep plan.
pub struct ResultPlotter<'a> {
    plan: &'a SweepPlan,
    backend: &'a dyn ChartBackend,
}

impl<'a> ResultPlotter<'a> {
    pub fn new(plan: &'a SweepPlan, backend: &'a dyn ChartBackend) -> Self {
        Self { plan, backend }
    }

    /// Chart name and chart for `config` given its loaded result.
    pub fn chart_for(&self, config: &SweepConfiguration, result: &BenchmarkResult) -> (String, Chart) {
        let workload = config.workload_name(self.plan.workload_label());
        let sizes = ChartSizes::for_config(config, self.plan.chart_naming());
        (
            chart_stem(&workload, &config.ratio, sizes),
            build_chart(&workload, &config.ratio, sizes, result),
        )
    }

    /// Load the result of `config` and save its chart.
    pub fn plot(&self, config: &SweepConfiguration) -> Result<PlotArtifact> {
        let result_path = self.plan.result_path(config);
        let result = BenchmarkResult::load(&result_path, self.plan.expected_workers())?;

        let (stem, chart) = self.chart_for(config, &result);
        let path = save_chart(self.backend, &chart, self.plan.charts_dir(), &stem)?;

        info!(chart = %path.display(), result = %result_path.display(), "chart written");
        Ok(PlotArtifact { path, stem, chart })
    }

    /// Plot every configuration of the plan, each in its own failure boundary.
    pub fn plot_all(&self, batch: BatchConfig, show_progress: bool) -> Result<BatchResults<PlotArtifact>> {
        self.plan.validate()?;
        let configs: Vec<SweepConfiguration> = self.plan.configurations().collect();
        BatchProcessor::new(batch).process(&configs, self, show_progress)
    }
}

impl BatchOperation for ResultPlotter<'_> {
    type Output = PlotArtifact;

    fn process(&self, config: &SweepConfiguration) -> Result<PlotArtifact> {
        self.plot(config).map_err(|e| {
            warn!(error = %e, "plotting failed, continuing with next configuration");
            e
        })
    }

    fn name(&self) -> &str {
        "plot"
    }
}
