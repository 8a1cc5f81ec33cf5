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

//! Deterministic artifact names.
//!
//! The result file name is the only contract between the driver and the
//! plotter. Both phases call [`result_file_name`]; nothing else in the crate
//! formats that name.

use crate::config::SweepConfiguration;
use crate::error::{Result, SweepError};
use crate::workload::OperationRatio;
use serde::{Deserialize, Serialize};

/// How chart file names and titles are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartNaming {
    /// `{workload}-{I}:{S}:{R}-n{N}-t{T}`
    #[default]
    Sweep,
    /// `{workload}-{I}:{S}:{R}`
    Simple,
}

/// Key bound and trace length shown in sweep-style chart names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSizes {
    pub max_keys: u64,
    pub trace_length: u64,
}

impl ChartSizes {
    /// Sizes of `config` when `naming` includes them.
    pub fn for_config(config: &SweepConfiguration, naming: ChartNaming) -> Option<Self> {
        match naming {
            ChartNaming::Sweep => Some(Self {
                max_keys: config.max_keys.get(),
                trace_length: config.trace_length.get(),
            }),
            ChartNaming::Simple => None,
        }
    }
}

/// Name of the result file the benchmark writes for `config`.
///
/// `{mode}-{insert}:{search}:{remove}-n{maxKeys}-t{traceLength}-v{version}.json`
///
/// # Examples
///
/// ```
/// use tracesweep::config::SweepConfiguration;
/// use tracesweep::naming::result_file_name;
/// use tracesweep::workload::{OperationRatio, TraceMode};
///
/// let config = SweepConfiguration::new(
///     TraceMode::Random,
///     OperationRatio::new(10, 80, 10),
///     10_000,
///     100_000,
///     0,
/// )
/// .unwrap();
/// assert_eq!(result_file_name(&config), "random-10:80:10-n10000-t100000-v0.json");
/// ```
pub fn result_file_name(config: &SweepConfiguration) -> String {
    format!(
        "{}-{}-n{}-t{}-v{}.json",
        config.mode, config.ratio, config.max_keys, config.trace_length, config.version
    )
}

/// Reject `value` when it cannot be embedded in a file name.
///
/// `what` names the value in the error message.
pub fn check_name_part(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SweepError::invalid_input(format!("{} must not be empty", what)));
    }
    if value.contains(['/', '\\']) {
        return Err(SweepError::invalid_input(format!(
            "{} '{}' must not contain path separators",
            what, value
        )));
    }
    Ok(())
}

/// Chart file stem (without extension).
///
/// Omits the version tag, so replotting a newer sweep overwrites the chart
/// of an older one unless the workload name changes.
pub fn chart_stem(workload: &str, ratio: &OperationRatio, sizes: Option<ChartSizes>) -> String {
    match sizes {
        Some(s) => format!(
            "{}-{}-n{}-t{}",
            workload, ratio, s.max_keys, s.trace_length
        ),
        None => format!("{}-{}", workload, ratio),
    }
}

/// Chart title, one entry per line.
pub fn chart_title(workload: &str, ratio: &OperationRatio, sizes: Option<ChartSizes>) -> Vec<String> {
    let mut lines = vec![
        format!("Performance Test for {}", workload),
        format!("with insert:search:remove ratio {}", ratio),
    ];
    if let Some(s) = sizes {
        lines.push(format!(
            "with {} max keys and trace length {}",
            s.max_keys, s.trace_length
        ));
    }
    lines
}
