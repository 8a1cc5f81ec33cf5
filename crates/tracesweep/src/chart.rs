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

//! Chart model and rendering.
//!
//! A [`Chart`] is a plain description of what to draw: a multi-line title,
//! axis labels, one horizontal reference line and one line series. Turning
//! it into an image is the job of a [`ChartBackend`]; [`SvgBackend`] writes a
//! self-contained SVG document.

use crate::error::{Result, SweepError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Stroke pattern of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Horizontal line spanning the whole X range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub label: String,
    pub value: f64,
    pub style: LineStyle,
}

/// A line through `(x, y)` points, drawn in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: LineStyle,
}

/// Everything needed to draw one comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title_lines: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub reference: ReferenceLine,
    pub series: Series,
}

/// Something that can turn a [`Chart`] into file contents.
pub trait ChartBackend: Send + Sync {
    /// File extension of rendered charts, without the dot.
    fn extension(&self) -> &str;

    /// Render `chart` to the backend's textual format.
    fn render(&self, chart: &Chart) -> Result<String>;
}

/// Render `chart` with `backend` and write it to `{dir}/{stem}.{ext}`.
///
/// An existing file with the same name is overwritten.
pub fn save_chart(
    backend: &dyn ChartBackend,
    chart: &Chart,
    dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    let content = backend.render(chart)?;

    fs::create_dir_all(dir).map_err(|e| SweepError::io_error(dir, e))?;
    let path = dir.join(format!("{}.{}", stem, backend.extension()));
    fs::write(&path, content).map_err(|e| SweepError::io_error(&path, e))?;
    Ok(path)
}

// Matplotlib's tab:blue and tab:red.
const REFERENCE_COLOR: &str = "#1f77b4";
const SERIES_COLOR: &str = "#d62728";

const TITLE_LINE_HEIGHT: f64 = 18.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 56.0;

/// SVG chart renderer.
#[derive(Debug, Clone, Copy)]
pub struct SvgBackend {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgBackend {
    fn default() -> Self {
        Self {
            width: 720,
            height: 540,
        }
    }
}

impl ChartBackend for SvgBackend {
    fn extension(&self) -> &str {
        "svg"
    }

    fn render(&self, chart: &Chart) -> Result<String> {
        if chart.series.points.is_empty() {
            return Err(SweepError::render(format!(
                "series '{}' has no points",
                chart.series.label
            )));
        }
        let all_finite = chart.reference.value.is_finite()
            && chart
                .series
                .points
                .iter()
                .all(|(x, y)| x.is_finite() && y.is_finite());
        if !all_finite {
            return Err(SweepError::render("chart contains non-finite values"));
        }

        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let top = 16.0 + TITLE_LINE_HEIGHT * chart.title_lines.len() as f64 + 12.0;
        let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - top - MARGIN_BOTTOM;
        if plot_w <= 0.0 || plot_h <= 0.0 {
            return Err(SweepError::render(format!(
                "canvas {}x{} is too small",
                self.width, self.height
            )));
        }

        let xs = XRange::of(&chart.series.points);
        let y_max = chart
            .series
            .points
            .iter()
            .map(|&(_, y)| y)
            .fold(chart.reference.value, f64::max);
        let y_step = if y_max > 0.0 { nice_step(y_max, 5.0) } else { 0.2 };
        let y_top = ((y_max / y_step).ceil() * y_step).max(y_step);
        if !(y_step.is_finite() && y_step > 0.0 && y_top.is_finite()) {
            return Err(SweepError::render(format!(
                "cannot scale the time axis to a maximum of {:e} s",
                y_max
            )));
        }
        let y_ticks = (y_top / y_step).round() as usize;

        let map_x = |x: f64| MARGIN_LEFT + (x - xs.min) / (xs.max - xs.min) * plot_w;
        let map_y = |y: f64| top + plot_h - (y / y_top) * plot_h;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
            w = self.width,
            h = self.height
        ));
        svg.push_str(&format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            self.width, self.height
        ));

        for (i, line) in chart.title_lines.iter().enumerate() {
            svg.push_str(&format!(
                "<text class=\"title\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\">{}</text>\n",
                width / 2.0,
                16.0 + TITLE_LINE_HEIGHT * (i as f64 + 1.0),
                escape(line)
            ));
        }

        // Grid and tick labels.
        for tick in 0..=y_ticks {
            let y = tick as f64 * y_step;
            let py = map_y(y);
            svg.push_str(&format!(
                "<line x1=\"{:.1}\" y1=\"{py:.1}\" x2=\"{:.1}\" y2=\"{py:.1}\" stroke=\"#e0e0e0\"/>\n",
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\">{}</text>\n",
                MARGIN_LEFT - 6.0,
                py + 4.0,
                format_tick(y)
            ));
        }

        let x_step = nice_step(xs.max - xs.min, 8.0).max(1.0);
        let mut x = (xs.min / x_step).ceil() * x_step;
        while x <= xs.max + x_step * 1e-9 {
            let px = map_x(x);
            svg.push_str(&format!(
                "<line x1=\"{px:.1}\" y1=\"{:.1}\" x2=\"{px:.1}\" y2=\"{:.1}\" stroke=\"#000\"/>\n",
                top + plot_h,
                top + plot_h + 5.0
            ));
            svg.push_str(&format!(
                "<text x=\"{px:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"11\">{}</text>\n",
                top + plot_h + 18.0,
                format_tick(x)
            ));
            x += x_step;
        }

        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"#000\"/>\n",
            MARGIN_LEFT, top, plot_w, plot_h
        ));

        svg.push_str(&format!(
            "<text class=\"x-label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\">{}</text>\n",
            MARGIN_LEFT + plot_w / 2.0,
            height - 14.0,
            escape(&chart.x_label)
        ));
        svg.push_str(&format!(
            "<text class=\"y-label\" x=\"16\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" transform=\"rotate(-90 16 {:.1})\">{}</text>\n",
            top + plot_h / 2.0,
            top + plot_h / 2.0,
            escape(&chart.y_label)
        ));

        // Reference line.
        let ry = map_y(chart.reference.value);
        svg.push_str(&format!(
            "<line class=\"reference\" data-value=\"{}\" x1=\"{:.1}\" y1=\"{ry:.2}\" x2=\"{:.1}\" y2=\"{ry:.2}\" stroke=\"{}\" stroke-width=\"1.5\"{}/>\n",
            chart.reference.value,
            MARGIN_LEFT,
            MARGIN_LEFT + plot_w,
            REFERENCE_COLOR,
            dash_attr(chart.reference.style)
        ));

        // Series.
        let points: Vec<String> = chart
            .series
            .points
            .iter()
            .map(|&(x, y)| format!("{:.2},{:.2}", map_x(x), map_y(y)))
            .collect();
        svg.push_str(&format!(
            "<polyline class=\"series\" points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"{}/>\n",
            points.join(" "),
            SERIES_COLOR,
            dash_attr(chart.series.style)
        ));

        // Legend.
        let lx = MARGIN_LEFT + plot_w - 130.0;
        let ly = top + 10.0;
        svg.push_str(&format!(
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"120\" height=\"44\" fill=\"white\" stroke=\"#bbb\"/>\n",
            lx, ly
        ));
        let entries = [
            (&chart.reference.label, REFERENCE_COLOR, chart.reference.style),
            (&chart.series.label, SERIES_COLOR, chart.series.style),
        ];
        for (i, (label, color, style)) in entries.iter().enumerate() {
            let ey = ly + 14.0 + 18.0 * i as f64;
            svg.push_str(&format!(
                "<line x1=\"{:.1}\" y1=\"{ey:.1}\" x2=\"{:.1}\" y2=\"{ey:.1}\" stroke=\"{}\" stroke-width=\"1.5\"{}/>\n",
                lx + 8.0,
                lx + 32.0,
                color,
                dash_attr(*style)
            ));
            svg.push_str(&format!(
                "<text class=\"legend\" x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\">{}</text>\n",
                lx + 38.0,
                ey + 4.0,
                escape(label)
            ));
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}

struct XRange {
    min: f64,
    max: f64,
}

impl XRange {
    fn of(points: &[(f64, f64)]) -> Self {
        let min = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
        if max > min {
            Self { min, max }
        } else {
            // Single worker count; widen so it lands in the middle.
            Self {
                min: min - 1.0,
                max: max + 1.0,
            }
        }
    }
}

/// Step of 1, 2 or 5 times a power of ten giving roughly `target` ticks.
fn nice_step(range: f64, target: f64) -> f64 {
    let raw = range / target;
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.0 {
        2.0
    } else if normalized < 7.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let s = format!("{:.4}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn dash_attr(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "",
        LineStyle::Dashed => " stroke-dasharray=\"6,4\"",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
