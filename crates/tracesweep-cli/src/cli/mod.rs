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

//! CLI command definitions and argument parsing.
//!
//! - [`sweep`]: commands that execute a sweep (run, plot, sweep)
//! - [`utility`]: commands that inspect a sweep or plot a single result
//!   (list, chart)
//! - [`args`]: argument groups shared between commands

pub mod args;
mod sweep;
mod utility;

use clap::Subcommand;

pub use sweep::SweepCommands;
pub use utility::UtilityCommands;

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── Sweep (run, plot, sweep)
/// └── Utility (list, chart)
/// ```
#[derive(Subcommand)]
pub enum Commands {
    // Sweep commands - flattened to appear at top level
    #[command(flatten)]
    Sweep(SweepCommands),

    // Utility commands - flattened to appear at top level
    #[command(flatten)]
    Utility(UtilityCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` with a printable message if the sweep definition is
    /// invalid or any configuration failed.
    pub fn execute(self) -> Result<(), String> {
        match self {
            Commands::Sweep(cmd) => cmd.execute(),
            Commands::Utility(cmd) => cmd.execute(),
        }
    }
}
