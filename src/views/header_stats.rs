// src/views/header_stats.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::Stats;
use crate::services::formatting::{format_currency, format_relative_time, group_thousands};

pub const TRACKER_TITLE: &str = "DEFENSE-TECH SPENDING TRACKER";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatItem {
    pub label: &'static str,
    pub value: String,
    pub highlight: bool,
    pub subdued: bool,
}

impl StatItem {
    fn plain(label: &'static str, value: String) -> Self {
        StatItem { label, value, highlight: false, subdued: false }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderStatsView {
    pub title: &'static str,
    pub items: Vec<StatItem>,
    pub live: bool,
}

impl HeaderStatsView {
    pub fn new(stats: &Stats, last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Self {
        let mut items = vec![
            StatItem { highlight: true, ..StatItem::plain("Total", format_currency(stats.total_spending_usd)) },
            StatItem::plain("Companies", stats.num_companies.to_string()),
            StatItem::plain("Agencies", stats.num_agencies.to_string()),
            StatItem::plain("Contracts", group_thousands(stats.total_defense_contracts)),
            StatItem::plain("Avg", format_currency(stats.avg_contract_value_usd)),
        ];
        if let Some(updated) = last_updated {
            items.push(StatItem { subdued: true, ..StatItem::plain("Updated", format_relative_time(updated, now)) });
        }

        HeaderStatsView { title: TRACKER_TITLE, items, live: true }
    }
}

impl fmt::Display for HeaderStatsView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)?;
        for item in &self.items {
            write!(f, " | {}: {}", item.label, item.value)?;
        }
        if self.live {
            write!(f, " | ● LIVE")?;
        }
        writeln!(f)
    }
}
