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

//! Workload parameters understood by the benchmark executable.
//!
//! A workload is described by a [`TraceMode`] (how keys arrive) and an
//! [`OperationRatio`] (the insert/search/remove mix of the generated trace).

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key-ordering strategy of the generated trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    /// Keys are drawn uniformly at random.
    Random,
    /// Keys arrive in ascending order.
    Ordered,
}

impl TraceMode {
    /// All modes, in their default sweep order.
    pub const ALL: [TraceMode; 2] = [TraceMode::Random, TraceMode::Ordered];

    /// The tag passed to `--mode` and embedded in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceMode::Random => "random",
            TraceMode::Ordered => "ordered",
        }
    }
}

impl fmt::Display for TraceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraceMode {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "random" => Ok(TraceMode::Random),
            "ordered" => Ok(TraceMode::Ordered),
            other => Err(SweepError::invalid_input(format!(
                "unknown mode '{}', expected one of {{random,ordered}}",
                other
            ))),
        }
    }
}

/// Percentage mix of insert, search and remove operations.
///
/// The three slots conventionally sum to 100, but this is not enforced:
/// `33:33:33` is part of the default sweep. Zero is valid in any slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RatioRepr", into = "String")]
pub struct OperationRatio {
    /// Insert share.
    pub insert: u32,
    /// Search share.
    pub search: u32,
    /// Remove share.
    pub remove: u32,
}

impl OperationRatio {
    /// Create a ratio triple.
    pub const fn new(insert: u32, search: u32, remove: u32) -> Self {
        Self {
            insert,
            search,
            remove,
        }
    }

    /// Sum of the three slots.
    pub fn total(&self) -> u64 {
        u64::from(self.insert) + u64::from(self.search) + u64::from(self.remove)
    }

    /// Whether the triple describes no operations at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// The three values following `--ratio` on the benchmark command line.
    pub fn as_args(&self) -> [String; 3] {
        [
            self.insert.to_string(),
            self.search.to_string(),
            self.remove.to_string(),
        ]
    }
}

impl fmt::Display for OperationRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.insert, self.search, self.remove)
    }
}

impl FromStr for OperationRatio {
    type Err = SweepError;

    /// Parse `I:S:R` (or `I,S,R`).
    fn from_str(s: &str) -> Result<Self> {
        let sep = if s.contains(':') { ':' } else { ',' };
        let parts: Vec<&str> = s.split(sep).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(SweepError::invalid_input(format!(
                "ratio '{}' must have the form insert:search:remove",
                s
            )));
        }

        let parse = |part: &str, slot: &str| {
            part.parse::<u32>().map_err(|_| {
                SweepError::invalid_input(format!(
                    "ratio '{}': {} share '{}' is not a non-negative integer",
                    s, slot, part
                ))
            })
        };

        Ok(Self::new(
            parse(parts[0], "insert")?,
            parse(parts[1], "search")?,
            parse(parts[2], "remove")?,
        ))
    }
}

impl From<OperationRatio> for String {
    fn from(ratio: OperationRatio) -> Self {
        ratio.to_string()
    }
}

/// Accepted config-file spellings of a ratio: `"10:80:10"` or `[10, 80, 10]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RatioRepr {
    Text(String),
    Triple([u32; 3]),
}

impl TryFrom<RatioRepr> for OperationRatio {
    type Error = SweepError;

    fn try_from(repr: RatioRepr) -> Result<Self> {
        match repr {
            RatioRepr::Text(s) => s.parse(),
            RatioRepr::Triple([i, s, r]) => Ok(Self::new(i, s, r)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_tags() {
        for mode in TraceMode::ALL {
            assert_eq!(mode.as_str().parse::<TraceMode>().unwrap(), mode);
        }
        assert_eq!(TraceMode::Random.to_string(), "random");
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = "shuffled".parse::<TraceMode>().unwrap_err();
        assert!(err.to_string().contains("shuffled"));
    }

    #[test]
    fn test_ratio_parse_and_display() {
        let ratio: OperationRatio = "10:80:10".parse().unwrap();
        assert_eq!(ratio, OperationRatio::new(10, 80, 10));
        assert_eq!(ratio.to_string(), "10:80:10");

        let comma: OperationRatio = "50, 0, 50".parse().unwrap();
        assert_eq!(comma, OperationRatio::new(50, 0, 50));
    }

    #[test]
    fn test_ratio_zero_slots() {
        let ratio: OperationRatio = "0:100:0".parse().unwrap();
        assert_eq!(ratio.as_args(), ["0", "100", "0"]);
        assert!(!ratio.is_empty());
        assert!(OperationRatio::new(0, 0, 0).is_empty());
    }

    #[test]
    fn test_ratio_rejects_malformed() {
        assert!("10:80".parse::<OperationRatio>().is_err());
        assert!("10:80:10:0".parse::<OperationRatio>().is_err());
        assert!("10:-1:10".parse::<OperationRatio>().is_err());
        assert!("a:b:c".parse::<OperationRatio>().is_err());
    }

    #[test]
    fn test_ratio_serde_forms() {
        let text: OperationRatio = serde_json::from_str("\"33:33:33\"").unwrap();
        let array: OperationRatio = serde_json::from_str("[33, 33, 33]").unwrap();
        assert_eq!(text, array);
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"33:33:33\"");
    }

    #[test]
    fn test_mode_serde() {
        let mode: TraceMode = serde_json::from_str("\"ordered\"").unwrap();
        assert_eq!(mode, TraceMode::Ordered);
    }
}
