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

//! List command - show what a sweep would do without doing it

use clap::ValueEnum;
use colored::Colorize;
use serde_json::json;
use tracesweep::chart::{ChartBackend, SvgBackend};
use tracesweep::driver::BenchmarkInvocation;
use tracesweep::naming::{chart_stem, ChartSizes};
use tracesweep::{SweepConfiguration, SweepPlan};

/// Output format of [`list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// One line per configuration with its result and chart file
    Text,
    /// The benchmark command lines, one per configuration
    Commands,
    /// JSON array with every field
    Json,
}

fn chart_file(plan: &SweepPlan, config: &SweepConfiguration, extension: &str) -> String {
    let workload = config.workload_name(plan.workload_label());
    let sizes = ChartSizes::for_config(config, plan.chart_naming());
    let stem = chart_stem(&workload, &config.ratio, sizes);
    plan.charts_dir()
        .join(format!("{}.{}", stem, extension))
        .display()
        .to_string()
}

/// Print the configurations of `plan` in invocation order.
pub fn list(plan: &SweepPlan, format: ListFormat) -> Result<(), String> {
    let backend = SvgBackend::default();
    let extension = backend.extension();
    let configs: Vec<SweepConfiguration> = plan.configurations().collect();

    match format {
        ListFormat::Text => {
            println!(
                "{} {} configurations (version {})",
                "Sweep:".bold(),
                configs.len(),
                plan.version()
            );
            for config in &configs {
                println!(
                    "  {} {:<9} {} -> {}",
                    format!("{:<8}", config.mode.as_str()).cyan(),
                    config.ratio.to_string(),
                    plan.result_path(config).display(),
                    chart_file(plan, config, extension).dimmed()
                );
            }
        }
        ListFormat::Commands => {
            for config in &configs {
                println!("{}", BenchmarkInvocation::new(config, plan).command_line());
            }
        }
        ListFormat::Json => {
            let entries: Vec<_> = configs
                .iter()
                .map(|config| {
                    json!({
                        "mode": config.mode,
                        "ratio": config.ratio,
                        "max_keys": config.max_keys.get(),
                        "trace_length": config.trace_length.get(),
                        "version": config.version,
                        "result_file": plan.result_path(config),
                        "chart_file": chart_file(plan, config, extension),
                        "command": BenchmarkInvocation::new(config, plan).command_line(),
                    })
                })
                .collect();
            let output = serde_json::to_string_pretty(&entries)
                .map_err(|e| format!("JSON serialization error: {}", e))?;
            println!("{}", output);
        }
    }
    Ok(())
}
