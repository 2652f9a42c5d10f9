// Chart domain model - Chart configurations handed to the charting sink
use super::dashboard::Series;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colours cycled across pie slices.
pub const PIE_PALETTE: [&str; 5] = ["#0d6efd", "#198754", "#ffc107", "#dc3545", "#6f42c1"];

/// The drawing surfaces the dashboard renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SurfaceId {
    #[serde(rename = "gymBranchPie")]
    BranchPie,
    #[serde(rename = "gymGenderPie")]
    GenderPie,
    #[serde(rename = "gymRecurrencePie")]
    RecurrencePie,
    #[serde(rename = "gymTimelineLine")]
    TimelineLine,
    #[serde(rename = "gymRevenueLine")]
    RevenueLine,
}

impl SurfaceId {
    pub const ALL: [SurfaceId; 5] = [
        SurfaceId::BranchPie,
        SurfaceId::GenderPie,
        SurfaceId::RecurrencePie,
        SurfaceId::TimelineLine,
        SurfaceId::RevenueLine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceId::BranchPie => "gymBranchPie",
            SurfaceId::GenderPie => "gymGenderPie",
            SurfaceId::RecurrencePie => "gymRecurrencePie",
            SurfaceId::TimelineLine => "gymTimelineLine",
            SurfaceId::RevenueLine => "gymRevenueLine",
        }
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Colors {
    Single(String),
    Cycle(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Colors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Option<String>>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
}

/// Y-axis ticks: the post-processing tag plus the labels it produces over
/// the data range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub format: TickFormat,
    pub values: Vec<f64>,
    pub labels: Vec<TickValue>,
}

impl Ticks {
    fn over(data: &[f64], format: TickFormat) -> Self {
        let values = y_axis_steps(data, format);
        let labels = values
            .iter()
            .map(|value| format.apply(&TickValue::Number(*value)))
            .collect();
        Self {
            format,
            values,
            labels,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub ticks: Ticks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins: Option<Plugins>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

/// Complete configuration for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: ChartData,
    pub options: ChartOptions,
}

/// A tick value as the charting library hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickValue {
    Number(f64),
    Text(String),
}

impl TickValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            TickValue::Number(v) if v.is_finite() => Some(*v),
            TickValue::Number(_) => None,
            TickValue::Text(text) => super::dashboard::parse_numeric(text),
        }
    }
}

/// Post-processing applied to y-axis tick labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TickFormat {
    Integer,
    UsdCurrency,
}

impl TickFormat {
    /// Format a tick; values that are not numeric come back unchanged.
    pub fn apply(&self, value: &TickValue) -> TickValue {
        let Some(number) = value.as_number() else {
            return value.clone();
        };

        match self {
            TickFormat::Integer => TickValue::Number(round_half_up(number)),
            TickFormat::UsdCurrency => TickValue::Text(format_usd(number)),
        }
    }
}

/// Round to the nearest integer with halves going towards positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Largest amount whose cents still fit exactly in an `f64`.
const EXACT_CENTS_LIMIT: f64 = 1e15;

/// Format an amount as US dollars with grouping and two fraction digits.
pub fn format_usd(amount: f64) -> String {
    let abs = amount.abs();
    let (whole, cents) = if abs < EXACT_CENTS_LIMIT {
        let cents = (abs * 100.0).round() as u64;
        ((cents / 100).to_string(), cents % 100)
    } else {
        (format!("{:.0}", abs.round()), 0)
    };
    let sign = if amount < 0.0 && (cents > 0 || whole != "0") { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(&whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

struct LineStyle {
    label: &'static str,
    border: &'static str,
    background: &'static str,
    ticks: TickFormat,
}

const NEW_MEMBERSHIPS_LINE: LineStyle = LineStyle {
    label: "New memberships",
    border: "#0d6efd",
    background: "rgba(13,110,253,0.08)",
    ticks: TickFormat::Integer,
};

const REVENUE_LINE: LineStyle = LineStyle {
    label: "Revenue",
    border: "#198754",
    background: "rgba(25,135,84,0.08)",
    ticks: TickFormat::UsdCurrency,
};

/// Pie chart over category counts. Missing labels become empty strings.
pub fn pie_chart(series: &Series) -> ChartConfig {
    let labels = series
        .labels
        .iter()
        .map(|label| Some(label.clone().unwrap_or_default()))
        .collect();

    ChartConfig {
        chart_type: ChartType::Pie,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: series.numeric_data(),
                background_color: Colors::Cycle(PIE_PALETTE.iter().map(|c| c.to_string()).collect()),
                border_color: None,
                tension: None,
                fill: None,
            }],
        },
        options: ChartOptions {
            responsive: true,
            plugins: None,
            scales: None,
        },
    }
}

/// Line chart of new memberships per period, integer ticks.
pub fn new_memberships_chart(series: &Series) -> ChartConfig {
    line_chart(series, &NEW_MEMBERSHIPS_LINE)
}

/// Line chart of revenue per period, currency ticks.
pub fn revenue_chart(series: &Series) -> ChartConfig {
    line_chart(series, &REVENUE_LINE)
}

/// Target number of intervals on a line chart's y axis.
const Y_AXIS_STEPS: f64 = 5.0;

/// Evenly spaced tick values from `min(0, data)` to `max(0, data)`, on a
/// 1/2/2.5/5 step. Integer axes never step below 1.
fn y_axis_steps(data: &[f64], format: TickFormat) -> Vec<f64> {
    let finite = data.iter().copied().filter(|v| v.is_finite());
    let min = finite.clone().fold(0.0, f64::min);
    let max = finite.fold(0.0, f64::max);
    if max == min {
        return vec![min];
    }

    let raw = (max - min) / Y_AXIS_STEPS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let mut step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= raw)
        .unwrap_or(10.0 * magnitude);
    if format == TickFormat::Integer {
        step = step.max(1.0);
    }

    let start = (min / step).floor();
    let end = (max / step).ceil();
    let count = (end - start).round() as usize;
    (0..=count).map(|i| (start + i as f64) * step).collect()
}

fn line_chart(series: &Series, style: &LineStyle) -> ChartConfig {
    let data = series.numeric_data();
    let ticks = Ticks::over(&data, style.ticks);

    ChartConfig {
        chart_type: ChartType::Line,
        data: ChartData {
            labels: series.labels.clone(),
            datasets: vec![Dataset {
                label: Some(style.label.to_string()),
                data,
                background_color: Colors::Single(style.background.to_string()),
                border_color: Some(style.border.to_string()),
                tension: Some(0.25),
                fill: Some(true),
            }],
        },
        options: ChartOptions {
            responsive: true,
            plugins: Some(Plugins {
                legend: Legend { display: false },
            }),
            scales: Some(Scales {
                y: Axis {
                    ticks,
                },
            }),
        },
    }
}
