//! Bar charts drawn with plain elements.
//!
//! [`scale_bars`] turns a dataset into bar heights as percentages of the tallest
//! value (or of a fixed ceiling). It rejects values that cannot be drawn, and
//! [`BarChart`] propagates that error so the surrounding [`ChartPanel`]'s error
//! boundary replaces just the chart, not the page.

use dioxus::prelude::*;
use thiserror::Error;

const CHART_CSS: Asset = asset!("/assets/styling/chart.css");

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("{label}: {value} is negative")]
    Negative { label: String, value: f64 },
    #[error("{label} is not a number")]
    NotFinite { label: String },
    #[error("Chart ceiling must be positive, got {0}")]
    BadCeiling(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Height as a percentage of the plot area, `0.0..=100.0`.
    pub height: f64,
}

/// Scale `points` against `ceiling`, or against the largest value when `None`.
///
/// Values above the ceiling are clamped to a full bar.
pub fn scale_bars(points: &[(String, f64)], ceiling: Option<f64>) -> Result<Vec<Bar>, ChartError> {
    for (label, value) in points {
        if !value.is_finite() {
            return Err(ChartError::NotFinite { label: label.clone() });
        }
        if *value < 0.0 {
            return Err(ChartError::Negative {
                label: label.clone(),
                value: *value,
            });
        }
    }

    let top = match ceiling {
        Some(c) if !c.is_finite() || c <= 0.0 => return Err(ChartError::BadCeiling(c)),
        Some(c) => c,
        None => points.iter().map(|(_, v)| *v).fold(0.0, f64::max),
    };

    Ok(points
        .iter()
        .map(|(label, value)| Bar {
            label: label.clone(),
            value: *value,
            height: if top > 0.0 { (value / top * 100.0).min(100.0) } else { 0.0 },
        })
        .collect())
}

#[component]
pub fn BarChart(
    points: Vec<(String, f64)>,
    #[props(default)] ceiling: Option<f64>,
    #[props(default = "".to_string())] unit: String,
) -> Element {
    let bars = scale_bars(&points, ceiling)?;

    rsx! {
        document::Stylesheet { href: CHART_CSS }
        div {
            class: "bar-chart",
            for bar in bars {
                div {
                    key: "{bar.label}",
                    class: "bar-chart-column",
                    div {
                        class: "bar-chart-track",
                        div {
                            class: "bar-chart-bar",
                            style: "height: {bar.height:.1}%",
                            title: "{bar.value}{unit}",
                        }
                    }
                    span { class: "bar-chart-label", "{bar.label}" }
                }
            }
        }
    }
}

/// A titled chart that survives a bad dataset.
#[component]
pub fn ChartPanel(
    title: String,
    points: Vec<(String, f64)>,
    #[props(default)] ceiling: Option<f64>,
    #[props(default = "".to_string())] unit: String,
) -> Element {
    rsx! {
        section {
            class: "chart-panel",
            h3 { "{title}" }
            ErrorBoundary {
                handle_error: |_: ErrorContext| {
                    tracing::warn!("Chart failed to render");
                    rsx! {
                        div { class: "chart-error", "This chart is unavailable." }
                    }
                },
                BarChart { points, ceiling, unit }
            }
        }
    }
}
