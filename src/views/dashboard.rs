// src/views/dashboard.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::{AgencySpending, Company, Contract, Stats};
use crate::services::insights::derive_insights;
use super::bar_chart::BarChartView;
use super::contract_table::{ContractTable, ContractTableView};
use super::header_stats::HeaderStatsView;
use super::insights::InsightsView;
use super::search_bar::PLACEHOLDER;
use super::DATA_SOURCES;

pub const RECENT_CONTRACTS_TITLE: &str = "RECENT CONTRACTS";

/// Everything the dashboard page shows once its queries have settled.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub stats: Stats,
    pub companies: Vec<Company>,
    pub agencies: Vec<AgencySpending>,
    pub contracts: Vec<Contract>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub header: HeaderStatsView,
    pub search_placeholder: &'static str,
    pub agencies_chart: BarChartView,
    pub contractors_chart: BarChartView,
    pub contracts: ContractTableView,
    pub insights: InsightsView,
    pub footer: String,
}

impl DashboardView {
    /// Builds the view with the contract table at `table`'s current page.
    pub fn new(data: &DashboardData, table: &ContractTable, now: DateTime<Utc>) -> Self {
        DashboardView {
            header: HeaderStatsView::new(&data.stats, Some(now), now),
            search_placeholder: PLACEHOLDER,
            agencies_chart: BarChartView::agencies(&data.agencies),
            contractors_chart: BarChartView::contractors(&data.companies),
            contracts: table.view(),
            insights: InsightsView::from(&derive_insights(&data.contracts)),
            footer: format!("{} | Last Updated: {}", DATA_SOURCES, now.format("%b %-d, %Y")),
        }
    }

    pub fn contract_table(data: &DashboardData) -> ContractTable {
        ContractTable::new(RECENT_CONTRACTS_TITLE, data.contracts.clone())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        writeln!(f, "[ {} ]", self.search_placeholder)?;
        writeln!(f)?;
        writeln!(f, "{}", self.agencies_chart)?;
        writeln!(f, "{}", self.contractors_chart)?;
        writeln!(f, "{}", self.contracts)?;
        writeln!(f, "{}", self.insights)?;
        writeln!(f, "{}", self.footer)
    }
}
