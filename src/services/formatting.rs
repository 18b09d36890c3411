// src/services/formatting.rs
//
// Display formatting for amounts, dates and trends. Everything here is pure.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;
const BILLION: f64 = 1_000_000_000.0;

/// Scaled value truncated to tenths. Dividing by a tenth of the unit keeps
/// exact integers exact, so 2_300_000 gives 23 tenths and not 22.999...
fn tenths_of(value: f64, unit: f64) -> u64 {
    (value / (unit / 10.0)).floor() as u64
}

fn with_suffix(tenths: u64, suffix: &str, keep_zero_decimal: bool) -> String {
    let (whole, decimal) = (tenths / 10, tenths % 10);
    if decimal == 0 && !keep_zero_decimal {
        format!("{}{}", whole, suffix)
    } else {
        format!("{}.{}{}", whole, decimal, suffix)
    }
}

/// Abbreviates with K/M/B suffixes: 5000 → "5K", 5_000_000 → "5M", 1_300_000_000 → "1.3B".
///
/// Values are truncated to one decimal so a unit only changes at its threshold
/// (999_999 is "999.9K", never "1000.0K"). Billions always carry their decimal.
pub fn format_number(value: f64) -> String {
    if value >= BILLION {
        with_suffix(tenths_of(value, BILLION), "B", true)
    } else if value >= MILLION {
        with_suffix(tenths_of(value, MILLION), "M", false)
    } else if value >= THOUSAND {
        with_suffix(tenths_of(value, THOUSAND), "K", false)
    } else {
        value.to_string()
    }
}

pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Whole dollars with thousands separators: 5000 → "$5,000".
pub fn format_currency_full(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(value.abs().round() as u64))
}

/// Integer with thousands separators: 1234567 → "1,234,567".
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// Parses the timestamp shapes the API hands out: RFC 3339, naive
/// date-times and plain dates (the latter two taken as UTC).
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`. Unparseable input is echoed back unchanged.
pub fn format_date(input: &str) -> String {
    match parse_timestamp(input) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => input.to_string(),
    }
}

/// `Jan 15, 2024`. Unparseable input is echoed back unchanged.
pub fn format_date_long(input: &str) -> String {
    match parse_timestamp(input) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => input.to_string(),
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n > 1 {
        format!("{} {}s ago", n, unit)
    } else {
        format!("{} {} ago", n, unit)
    }
}

/// Age of `timestamp` relative to `now` in the coarsest unit that applies.
pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        plural(days, "day")
    } else if hours > 0 {
        plural(hours, "hour")
    } else if minutes > 0 {
        plural(minutes, "min")
    } else {
        "just now".to_string()
    }
}

pub fn format_relative_time_since(input: &str) -> String {
    match parse_timestamp(input) {
        Some(dt) => format_relative_time(dt, Utc::now()),
        None => input.to_string(),
    }
}

/// Fraction to percent with one decimal: 0.123 → "12.3%".
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Visual emphasis for an amount. Upper bounds are inclusive at the higher tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountTier {
    Baseline,
    Elevated,
    High,
    Top,
}

impl AmountTier {
    pub fn css_class(&self) -> &'static str {
        match self {
            AmountTier::Top => "text-green-500",
            AmountTier::High => "text-green-400",
            AmountTier::Elevated => "text-amber-400",
            AmountTier::Baseline => "text-gray-400",
        }
    }
}

pub fn get_amount_color(amount: f64) -> AmountTier {
    if amount >= 1_000_000_000.0 {
        AmountTier::Top
    } else if amount >= 500_000_000.0 {
        AmountTier::High
    } else if amount >= 100_000_000.0 {
        AmountTier::Elevated
    } else {
        AmountTier::Baseline
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendEmphasis {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendIndicator {
    pub direction: TrendDirection,
    pub arrow: &'static str,
    pub emphasis: TrendEmphasis,
    pub label: String,
}

/// Arrow, emphasis and label for a signed fractional change.
/// A zero change is labelled "0%", not `format_percentage(0.0)`.
pub fn get_trend_indicator(change: f64) -> TrendIndicator {
    if change > 0.0 {
        TrendIndicator {
            direction: TrendDirection::Up,
            arrow: "↑",
            emphasis: TrendEmphasis::Positive,
            label: format!("+{}", format_percentage(change)),
        }
    } else if change < 0.0 {
        TrendIndicator {
            direction: TrendDirection::Down,
            arrow: "↓",
            emphasis: TrendEmphasis::Negative,
            label: format_percentage(change.abs()),
        }
    } else {
        TrendIndicator {
            direction: TrendDirection::Flat,
            arrow: "→",
            emphasis: TrendEmphasis::Neutral,
            label: "0%".to_string(),
        }
    }
}

/// Cuts `name` to `max_chars` characters and marks the cut with "...".
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() > max_chars {
        let head: String = name.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}
