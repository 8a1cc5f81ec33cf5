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

//! Plot command - chart existing benchmark results

use super::finish;
use crate::cli::args::ExecArgs;
use colored::Colorize;
use tracesweep::chart::SvgBackend;
use tracesweep::plotter::ResultPlotter;
use tracesweep::report::SweepReport;
use tracesweep::SweepPlan;

/// Plot the result of every configuration.
///
/// Never runs the benchmark. Re-plotting overwrites existing charts.
pub fn plot(plan: &SweepPlan, exec: &ExecArgs) -> Result<(), String> {
    let backend = SvgBackend::default();
    let plots = ResultPlotter::new(plan, &backend)
        .plot_all(exec.batch_config(), true)
        .map_err(|e| e.to_string())?;

    let mut report = SweepReport::new(plan);
    report.record_plots(&plots);

    if exec.verbose {
        for artifact in plots.successes().filter_map(|item| item.result.as_ref().ok()) {
            println!("  {} {}", "✓".green(), artifact.path.display());
        }
    }
    if plots.all_succeeded() {
        println!(
            "{} {} charts written to {}",
            "✓".green().bold(),
            report.chart_count(),
            plan.charts_dir().display()
        );
    }
    finish(&report, exec)
}
