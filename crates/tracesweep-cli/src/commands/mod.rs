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

//! CLI command implementations

mod chart;
mod list;
mod plot;
mod run;
mod sweep;

pub use chart::chart;
pub use list::{list, ListFormat};
pub use plot::plot;
pub use run::run;
pub use sweep::sweep;

use crate::cli::args::ExecArgs;
use colored::Colorize;
use tracesweep::report::SweepReport;

/// Write the optional JSON summary, report failed configurations and turn
/// the report into the command's exit status.
fn finish(report: &SweepReport, exec: &ExecArgs) -> Result<(), String> {
    if let Some(path) = &exec.summary {
        report.write_json(path).map_err(|e| e.to_string())?;
        if exec.verbose {
            println!("{} {}", "Summary written to".dimmed(), path.display());
        }
    }

    report.print_failures();

    let failed = report.failures().count();
    if failed > 0 {
        return Err(format!(
            "{} of {} configurations failed",
            failed,
            report.total()
        ));
    }
    Ok(())
}
