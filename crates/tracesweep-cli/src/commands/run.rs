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

//! Run command - benchmark every configuration of a sweep

use super::finish;
use crate::cli::args::ExecArgs;
use colored::Colorize;
use tracesweep::driver::{ProcessRunner, SweepDriver};
use tracesweep::report::SweepReport;
use tracesweep::SweepPlan;

/// Run the benchmark once per configuration, strictly one at a time.
///
/// # Errors
///
/// Returns `Err` if the results directory cannot be created or any
/// benchmark run failed.
pub fn run(plan: &SweepPlan, exec: &ExecArgs) -> Result<(), String> {
    let runner = ProcessRunner;
    let runs = SweepDriver::new(plan, &runner)
        .with_batch_config(exec.batch_config())
        .run(true)
        .map_err(|e| e.to_string())?;

    let mut report = SweepReport::new(plan);
    report.record_runs(&runs);

    if runs.all_succeeded() {
        println!(
            "{} {} benchmark runs completed",
            "✓".green().bold(),
            runs.total()
        );
    }
    finish(&report, exec)
}
