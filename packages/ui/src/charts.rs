//! SVG bar and pie charts.
//!
//! Layout math is kept in plain functions ([`bar_layout`], [`pie_slices`],
//! [`arc_path`]) and tested; the components only turn the result into SVG.

use std::f64::consts::{FRAC_PI_2, TAU};

use api::TypeTotal;
use dioxus::prelude::*;

/// Slice and bar colours, cycled.
pub const COLORS: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D",
];

pub fn color(index: usize) -> &'static str {
    COLORS[index % COLORS.len()]
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDatum {
    pub label: String,
    pub value: f64,
}

impl ChartDatum {
    pub fn from_totals(totals: &[TypeTotal]) -> Vec<ChartDatum> {
        totals
            .iter()
            .map(|t| ChartDatum {
                label: t.label().to_string(),
                value: t.amount(),
            })
            .collect()
    }
}

/// "Plastic 42%"
pub fn slice_label(name: &str, fraction: f64) -> String {
    format!("{name} {:.0}%", fraction * 100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub fraction: f64,
    /// Radians, clockwise from twelve o'clock.
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

/// Angles of the pie. Non-positive values get no slice but keep their colour
/// index, so colours match the bar chart.
pub fn pie_slices(data: &[ChartDatum]) -> Vec<PieSlice> {
    let total: f64 = data.iter().map(|d| d.value).filter(|v| *v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut angle = 0.0;
    data.iter()
        .enumerate()
        .filter(|(_, d)| d.value > 0.0)
        .map(|(i, d)| {
            let fraction = d.value / total;
            let start = angle;
            angle += fraction * TAU;
            PieSlice {
                label: d.label.clone(),
                value: d.value,
                fraction,
                start,
                end: angle,
                color: color(i),
            }
        })
        .collect()
}

fn point(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    let a = angle - FRAC_PI_2;
    (cx + r * a.cos(), cy + r * a.sin())
}

/// SVG path of a pie slice between two angles.
pub fn arc_path(cx: f64, cy: f64, r: f64, start: f64, end: f64) -> String {
    if end - start >= TAU - 1e-9 {
        // A single arc cannot close on itself
        return format!(
            "M {cx:.2} {:.2} A {r:.2} {r:.2} 0 1 1 {cx:.2} {:.2} A {r:.2} {r:.2} 0 1 1 {cx:.2} {:.2} Z",
            cy - r,
            cy + r,
            cy - r
        );
    }
    let (x0, y0) = point(cx, cy, r, start);
    let (x1, y1) = point(cx, cy, r, end);
    let large = u8::from(end - start > std::f64::consts::PI);
    format!("M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
}

impl Bar {
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Bars scaled so the largest value fills `height`.
pub fn bar_layout(data: &[ChartDatum], width: f64, height: f64) -> Vec<Bar> {
    if data.is_empty() {
        return Vec::new();
    }
    let max = data.iter().map(|d| d.value).fold(0.0_f64, f64::max);
    let slot = width / data.len() as f64;
    let bar_width = slot * 0.6;
    data.iter()
        .enumerate()
        .map(|(i, d)| {
            let h = if max > 0.0 { d.value.max(0.0) / max * height } else { 0.0 };
            Bar {
                label: d.label.clone(),
                value: d.value,
                x: i as f64 * slot + (slot - bar_width) / 2.0,
                y: height - h,
                width: bar_width,
                height: h,
                color: color(i),
            }
        })
        .collect()
}

const BAR_WIDTH: f64 = 480.0;
const BAR_HEIGHT: f64 = 220.0;
const LABEL_SPACE: f64 = 40.0;
const LABEL_Y: f64 = BAR_HEIGHT + 18.0;

/// Hover text of a bar. Per-type totals mix units, so none is shown.
pub fn bar_title(label: &str, value: f64) -> String {
    format!("{label}: {value:.1}")
}

#[component]
pub fn BarChart(data: Vec<ChartDatum>) -> Element {
    let bars = bar_layout(&data, BAR_WIDTH, BAR_HEIGHT);
    let view_box = format!("0 0 {BAR_WIDTH} {}", BAR_HEIGHT + LABEL_SPACE);

    rsx! {
        svg {
            class: "chart chart-bar",
            view_box: "{view_box}",
            line {
                x1: "0",
                y1: "{BAR_HEIGHT}",
                x2: "{BAR_WIDTH}",
                y2: "{BAR_HEIGHT}",
                stroke: "#d1d5db",
            }
            for bar in bars {
                g {
                    key: "{bar.label}",
                    rect {
                        x: "{bar.x:.2}",
                        y: "{bar.y:.2}",
                        width: "{bar.width:.2}",
                        height: "{bar.height:.2}",
                        fill: "{bar.color}",
                        rx: "3",
                        title { {bar_title(&bar.label, bar.value)} }
                    }
                    text {
                        x: format!("{:.2}", bar.center()),
                        y: "{LABEL_Y}",
                        text_anchor: "middle",
                        font_size: "12",
                        "{bar.label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn PieChart(data: Vec<ChartDatum>) -> Element {
    let slices = pie_slices(&data);
    let (cx, cy, r) = (150.0, 150.0, 100.0);

    rsx! {
        div {
            class: "chart chart-pie",
            svg {
                view_box: "0 0 300 300",
                for slice in slices.iter() {
                    path {
                        key: "{slice.label}",
                        d: arc_path(cx, cy, r, slice.start, slice.end),
                        fill: "{slice.color}",
                        stroke: "#ffffff",
                        title { "{slice.label}: {slice.value:.1}" }
                    }
                }
            }
            ul {
                class: "chart-legend",
                for slice in slices.iter() {
                    li {
                        key: "{slice.label}",
                        span { class: "chart-swatch", style: "background: {slice.color};" }
                        {slice_label(&slice.label, slice.fraction)}
                    }
                }
            }
        }
    }
}
