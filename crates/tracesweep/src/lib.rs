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

//! Parameter sweeps over an external trace benchmark, plotted as scaling
//! charts.
//!
//! A sweep runs a concurrent-data-structure benchmark executable once per
//! combination of trace mode and insert/search/remove ratio, then draws one
//! chart per combination comparing the sequential baseline with the
//! parallel completion time at each worker count.
//!
//! The two phases run one after the other:
//!
//! 1. [`driver`]: enumerate the [`config::SweepPlan`], run the benchmark for
//!    every [`config::SweepConfiguration`], one process at a time.
//! 2. [`plotter`]: load each result file and save its chart.
//!
//! The phases only share the result file name, derived in [`naming`], and
//! the record schema, parsed in [`result`]. Each configuration is its own
//! failure boundary ([`batch`]): a failed run or a broken result never stops
//! the remaining configurations.
//!
//! # Example
//!
//! ```no_run
//! use tracesweep::chart::SvgBackend;
//! use tracesweep::config::SweepPlan;
//! use tracesweep::driver::ProcessRunner;
//! use tracesweep::pipeline::{run_pipeline, PipelineOptions};
//!
//! # fn main() -> Result<(), tracesweep::error::SweepError> {
//! let plan = SweepPlan::default().with_results_dir("results").with_charts_dir("charts");
//! let report = run_pipeline(&plan, &ProcessRunner, &SvgBackend::default(), &PipelineOptions::default())?;
//! println!("{} of {} charts written", report.chart_count(), report.total());
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod chart;
pub mod config;
pub mod driver;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod plotter;
pub mod report;
pub mod result;
pub mod workload;

pub use config::{SweepConfiguration, SweepPlan};
pub use error::{Result, SweepError};
pub use naming::result_file_name;
pub use workload::{OperationRatio, TraceMode};
