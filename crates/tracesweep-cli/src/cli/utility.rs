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

//! Utility commands: listing a sweep and plotting a single result.

use super::args::SweepArgs;
use crate::commands::{self, ListFormat};
use clap::Subcommand;
use std::path::PathBuf;
use tracesweep::OperationRatio;

/// Utility commands.
#[derive(Subcommand)]
pub enum UtilityCommands {
    /// List configurations, result files and benchmark commands
    ///
    /// Nothing is executed; useful to check a sweep definition.
    List {
        #[command(flatten)]
        sweep: SweepArgs,

        /// Output format (text, commands, json)
        #[arg(short, long, default_value = "text")]
        format: ListFormat,
    },

    /// Plot a single result file
    ///
    /// The chart is named `{workload}-{I}:{S}:{R}`, with `-n{N}-t{T}`
    /// appended when the key bound and trace length are given.
    Chart {
        /// Benchmark result file
        #[arg(value_name = "RESULT")]
        result: PathBuf,

        /// Workload name shown in the title and used in the chart name
        #[arg(short, long)]
        workload: String,

        /// Insert:search:remove ratio of the run
        #[arg(short, long, value_name = "I:S:R")]
        ratio: OperationRatio,

        /// Key bound of the run
        #[arg(short = 'n', long, value_name = "N", requires = "trace_length")]
        num_keys: Option<u64>,

        /// Trace length of the run
        #[arg(short = 't', long, value_name = "T", requires = "num_keys")]
        trace_length: Option<u64>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Number of worker counts the result must report
        #[arg(long, value_name = "N", conflicts_with = "any_worker_count")]
        workers: Option<usize>,

        /// Accept results with any number of worker counts
        #[arg(long)]
        any_worker_count: bool,
    },
}

impl UtilityCommands {
    /// Execute the utility command.
    pub fn execute(self) -> Result<(), String> {
        match self {
            UtilityCommands::List { sweep, format } => commands::list(&sweep.into_plan()?, format),
            UtilityCommands::Chart {
                result,
                workload,
                ratio,
                num_keys,
                trace_length,
                output_dir,
                workers,
                any_worker_count,
            } => {
                let expected = if any_worker_count {
                    None
                } else {
                    Some(workers.unwrap_or(tracesweep::config::DEFAULT_EXPECTED_WORKERS))
                };
                let sizes = num_keys.zip(trace_length);
                commands::chart(&result, &workload, &ratio, sizes, expected, &output_dir)
            }
        }
    }
}
