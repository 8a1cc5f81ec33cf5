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

//! Sweep command - run every configuration, then plot every result

use super::finish;
use crate::cli::args::ExecArgs;
use colored::Colorize;
use tracesweep::chart::SvgBackend;
use tracesweep::driver::ProcessRunner;
use tracesweep::pipeline::{run_pipeline, PipelineOptions};
use tracesweep::SweepPlan;

/// Run the full sweep.
///
/// Plotting starts only after the last benchmark run has exited.
pub fn sweep(plan: &SweepPlan, exec: &ExecArgs) -> Result<(), String> {
    let options = PipelineOptions {
        batch: exec.batch_config(),
        show_progress: true,
    };
    let report = run_pipeline(plan, &ProcessRunner, &SvgBackend::default(), &options)
        .map_err(|e| e.to_string())?;

    if exec.verbose {
        for entry in &report.entries {
            if let Some(chart) = &entry.chart {
                println!("  {} {}", "✓".green(), chart.display());
            }
        }
    }
    println!(
        "{} {} of {} configurations charted",
        if report.all_succeeded() {
            "✓".green().bold()
        } else {
            "!".yellow().bold()
        },
        report.chart_count(),
        report.total()
    );
    finish(&report, exec)
}
