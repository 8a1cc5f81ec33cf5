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

//! Chart command - plot a single result file

use colored::Colorize;
use std::path::Path;
use tracesweep::chart::SvgBackend;
use tracesweep::naming::ChartSizes;
use tracesweep::plotter::plot_single;
use tracesweep::OperationRatio;

/// Plot one result file.
///
/// `sizes` is the key bound and trace length; when given they appear in
/// the chart title and name.
pub fn chart(
    result: &Path,
    workload: &str,
    ratio: &OperationRatio,
    sizes: Option<(u64, u64)>,
    expected_workers: Option<usize>,
    output_dir: &Path,
) -> Result<(), String> {
    let sizes = sizes.map(|(max_keys, trace_length)| ChartSizes {
        max_keys,
        trace_length,
    });
    let artifact = plot_single(
        result,
        workload,
        ratio,
        sizes,
        expected_workers,
        &SvgBackend::default(),
        output_dir,
    )
    .map_err(|e| e.to_string())?;

    println!("{} {}", "✓".green().bold(), artifact.path.display());
    Ok(())
}
