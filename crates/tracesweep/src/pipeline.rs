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

//! Two-phase sweep: run everything, then plot everything.

use crate::batch::BatchConfig;
use crate::chart::ChartBackend;
use crate::config::SweepPlan;
use crate::driver::{BenchmarkRunner, SweepDriver};
use crate::error::Result;
use crate::plotter::ResultPlotter;
use crate::report::SweepReport;
use tracing::info;

/// Knobs for [`run_pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Progress and parallelism settings. Only the plot phase may run in
    /// parallel.
    pub batch: BatchConfig,
    /// Print progress and phase summaries.
    pub show_progress: bool,
}

/// Run the benchmark for every configuration, then plot every result.
///
/// The plot phase starts only after the last benchmark has exited. A
/// configuration whose run failed is still plotted; if the benchmark left
/// no usable result the plot fails for that configuration alone.
pub fn run_pipeline<R: BenchmarkRunner>(
    plan: &SweepPlan,
    runner: &R,
    backend: &dyn ChartBackend,
    options: &PipelineOptions,
) -> Result<SweepReport> {
    plan.validate()?;
    let mut report = SweepReport::new(plan);

    let runs = SweepDriver::new(plan, runner)
        .with_batch_config(options.batch.clone())
        .run(options.show_progress)?;
    report.record_runs(&runs);

    let plots = ResultPlotter::new(plan, backend).plot_all(options.batch.clone(), options.show_progress)?;
    report.record_plots(&plots);

    info!(
        configurations = report.total(),
        charts = report.chart_count(),
        "pipeline finished"
    );
    Ok(report)
}
