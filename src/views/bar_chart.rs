// src/views/bar_chart.rs
use serde::Serialize;
use std::fmt;

use crate::models::{AgencySpending, Company};
use crate::services::formatting::{format_currency, truncate_label};
use super::NO_DATA;

pub const CHART_ROWS: usize = 10;
pub const AGENCY_LABEL_CHARS: usize = 25;
pub const COMPANY_LABEL_CHARS: usize = 20;
const MIN_BAR_PCT: f64 = 2.0;
const TEXT_BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub name: String,
    pub full_name: String,
    pub value: f64,
    pub label: String,
    /// Share of the largest bar, in percent.
    pub width_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartView {
    pub title: String,
    pub bars: Vec<Bar>,
}

impl BarChartView {
    pub fn new<I>(title: &str, items: I, max_label_chars: usize) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let items: Vec<(String, f64)> = items.into_iter().take(CHART_ROWS).collect();
        let max_value = items.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);

        let bars = items
            .into_iter()
            .map(|(full_name, value)| Bar {
                name: truncate_label(&full_name, max_label_chars),
                label: format_currency(value),
                width_pct: bar_width(value, max_value),
                full_name,
                value,
            })
            .collect();

        BarChartView { title: title.to_string(), bars }
    }

    pub fn agencies(agencies: &[AgencySpending]) -> Self {
        Self::new(
            "TOP SPENDING AGENCIES",
            agencies.iter().map(|a| (a.agency.clone(), a.total_value)),
            AGENCY_LABEL_CHARS,
        )
    }

    pub fn contractors(companies: &[Company]) -> Self {
        Self::new(
            "TOP CONTRACTORS",
            companies.iter().map(|c| (c.name.clone(), c.total_contract_value)),
            COMPANY_LABEL_CHARS,
        )
    }
}

fn bar_width(value: f64, max_value: f64) -> f64 {
    if max_value <= 0.0 || value <= 0.0 {
        0.0
    } else {
        (value / max_value * 100.0).max(MIN_BAR_PCT)
    }
}

impl fmt::Display for BarChartView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} ({} items)", self.title, self.bars.len())?;
        if self.bars.is_empty() {
            return writeln!(f, "  {}", NO_DATA);
        }
        let name_width = self.bars.iter().map(|b| b.name.chars().count()).max().unwrap_or(0);
        for bar in &self.bars {
            let cells = (bar.width_pct / 100.0 * TEXT_BAR_WIDTH as f64).round() as usize;
            writeln!(
                f,
                "  {:>name_width$} {:<bar_width$} {}",
                bar.name,
                "█".repeat(cells),
                bar.label,
                name_width = name_width,
                bar_width = TEXT_BAR_WIDTH,
            )?;
        }
        Ok(())
    }
}
