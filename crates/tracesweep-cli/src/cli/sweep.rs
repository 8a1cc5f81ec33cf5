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

//! Commands that execute a sweep.

use super::args::{ExecArgs, SweepArgs};
use crate::commands;
use clap::Subcommand;

/// Sweep commands.
///
/// `run` and `plot` are the two phases of `sweep` on their own. All three
/// accept the same sweep definition so that `plot` finds exactly the files
/// `run` produced.
#[derive(Subcommand)]
pub enum SweepCommands {
    /// Run the benchmark for every configuration
    ///
    /// Invokes the benchmark once per mode and ratio, strictly one process
    /// at a time. Failed runs are reported and skipped, never retried.
    Run {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        exec: ExecArgs,

        /// Print the invocations without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Plot existing benchmark results
    ///
    /// Loads the result file of every configuration and writes one chart
    /// per configuration. A missing or malformed result only affects its
    /// own chart.
    Plot {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        exec: ExecArgs,
    },

    /// Run the benchmark for every configuration, then plot all results
    Sweep {
        #[command(flatten)]
        sweep: SweepArgs,

        #[command(flatten)]
        exec: ExecArgs,
    },
}

impl SweepCommands {
    /// Execute the sweep command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            SweepCommands::Run {
                sweep,
                exec,
                dry_run,
            } => {
                let plan = sweep.into_plan()?;
                if dry_run {
                    commands::list(&plan, commands::ListFormat::Commands)
                } else {
                    commands::run(&plan, &exec)
                }
            }
            SweepCommands::Plot { sweep, exec } => commands::plot(&sweep.into_plan()?, &exec),
            SweepCommands::Sweep { sweep, exec } => commands::sweep(&sweep.into_plan()?, &exec),
        }
    }
}
