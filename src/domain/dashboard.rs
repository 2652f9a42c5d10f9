// Dashboard domain model - The payload the dashboard renders from
use serde::{Deserialize, Serialize};

/// Headline membership counts shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipCounts {
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub expired: u64,
    #[serde(default)]
    pub suspended: u64,
    #[serde(default)]
    pub about_to_expire: u64,
}

/// A single value inside a series as the backend sends it.
///
/// Counts usually arrive as numbers, but month buckets and sums can come back
/// as strings or nulls depending on the backend's grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Null,
}

impl SeriesValue {
    /// Loose numeric reading: finite numbers pass, numeric strings parse,
    /// blank strings and null read as zero, booleans read as 1/0.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SeriesValue::Number(v) if v.is_finite() => Some(*v),
            SeriesValue::Number(_) => None,
            SeriesValue::Text(text) => parse_numeric(text),
            SeriesValue::Flag(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            SeriesValue::Null => Some(0.0),
        }
    }

    /// Numeric value for plotting; anything non-numeric plots as zero.
    pub fn numeric_or_zero(&self) -> f64 {
        self.as_number().unwrap_or(0.0)
    }
}

impl From<f64> for SeriesValue {
    fn from(value: f64) -> Self {
        SeriesValue::Number(value)
    }
}

impl From<u64> for SeriesValue {
    fn from(value: u64) -> Self {
        SeriesValue::Number(value as f64)
    }
}

impl From<&str> for SeriesValue {
    fn from(value: &str) -> Self {
        SeriesValue::Text(value.to_string())
    }
}

/// Parse a string the way a browser's `Number()` would, restricted to finite
/// values. Blank input is zero. Unsigned `0x`/`0o`/`0b` literals are accepted.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    if let Some(value) = parse_radix_literal(trimmed) {
        return value;
    }

    // Rust accepts "inf"/"nan" spellings that must not count as numbers here
    let plain_decimal = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
    if !plain_decimal {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `Some(parsed)` when `text` carries a radix prefix, `None` otherwise.
fn parse_radix_literal(text: &str) -> Option<Option<f64>> {
    let prefix = text.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
    });
    Some(value.filter(|v| v.is_finite()))
}

/// Index-aligned labels and values for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub labels: Vec<Option<String>>,
    #[serde(default)]
    pub data: Vec<SeriesValue>,
}

impl Series {
    pub fn new(labels: Vec<Option<String>>, data: Vec<SeriesValue>) -> Self {
        Self { labels, data }
    }

    /// Values coerced for plotting.
    pub fn numeric_data(&self) -> Vec<f64> {
        self.data.iter().map(SeriesValue::numeric_or_zero).collect()
    }
}

/// Aggregate statistics backing the gym dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(flatten)]
    pub counts: MembershipCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_branch: Option<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_gender: Option<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_recurrence: Option<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Series>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_monthly: Option<Series>,
}
