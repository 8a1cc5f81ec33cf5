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

//! TraceSweep Command Line Interface

use clap::Parser;
use std::process::ExitCode;
use tracesweep_cli::cli::Commands;
use tracing_subscriber::EnvFilter;

/// TraceSweep - benchmark sweeps and scaling charts
///
/// Runs a concurrent-structure benchmark across trace modes and
/// insert:search:remove ratios, then charts sequential against parallel
/// time for every run.
///
/// # Examples
///
/// ```bash
/// # Run the default sweep and plot it
/// tracesweep sweep --benchmark ./performance_test
///
/// # Show the benchmark commands without running them
/// tracesweep run --dry-run -r 25:50:25
///
/// # Re-plot the results of version 3 in parallel
/// tracesweep plot --run-version 3 --parallel
///
/// # Plot one result file
/// tracesweep chart out.json --workload "random operators" --ratio 10:80:10
/// ```
#[derive(Parser)]
#[command(name = "tracesweep")]
#[command(author, version, about = "TraceSweep - benchmark sweeps and scaling charts", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(debug: bool) {
    let directive = if debug { "tracesweep=debug" } else { "tracesweep=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
