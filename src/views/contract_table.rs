// src/views/contract_table.rs
use serde::Serialize;
use std::fmt;

use crate::models::Contract;
use crate::services::formatting::{format_currency_full, format_date, get_amount_color, AmountTier};
use crate::services::pagination::Pagination;
use super::NO_DATA;

/// User interaction with the table. Row indices are relative to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    PreviousPage,
    NextPage,
    GoToPage(usize),
    SelectCompany(usize),
    OpenContract(usize),
}

/// What the owning page has to act on. Paging is handled by the table itself.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEffect {
    CompanySelected(String),
    ContractOpened(Contract),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractRow {
    pub contract_id: String,
    pub company: String,
    pub agency: String,
    pub amount: String,
    pub amount_tier: AmountTier,
    pub date: String,
    pub source_url: String,
}

impl From<&Contract> for ContractRow {
    fn from(contract: &Contract) -> Self {
        ContractRow {
            contract_id: contract.contract_id.clone(),
            company: contract.company.clone(),
            agency: contract.agency.clone(),
            amount: format_currency_full(contract.contract_value),
            amount_tier: get_amount_color(contract.contract_value),
            date: format_date(&contract.contract_date),
            source_url: contract.source_url(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractTableView {
    pub title: String,
    pub rows: Vec<ContractRow>,
    pub page: usize,
    pub total_pages: usize,
    pub total_contracts: usize,
    pub showing: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// Paginated contract list. Owns only its page cursor; it never fetches.
#[derive(Debug, Clone)]
pub struct ContractTable {
    title: String,
    contracts: Vec<Contract>,
    pagination: Pagination,
}

impl ContractTable {
    pub fn new(title: &str, contracts: Vec<Contract>) -> Self {
        let pagination = Pagination::new(contracts.len());
        ContractTable { title: title.to_string(), contracts, pagination }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn current_rows(&self) -> &[Contract] {
        self.pagination.slice(&self.contracts)
    }

    fn row(&self, index: usize) -> Option<&Contract> {
        self.current_rows().get(index)
    }

    pub fn handle(&mut self, event: TableEvent) -> Option<TableEffect> {
        match event {
            TableEvent::PreviousPage => {
                self.pagination.previous();
                None
            }
            TableEvent::NextPage => {
                self.pagination.next();
                None
            }
            TableEvent::GoToPage(page) => {
                self.pagination.go_to(page);
                None
            }
            TableEvent::SelectCompany(index) => self
                .row(index)
                .map(|c| TableEffect::CompanySelected(c.company.clone())),
            TableEvent::OpenContract(index) => self
                .row(index)
                .map(|c| TableEffect::ContractOpened(c.clone())),
        }
    }

    pub fn view(&self) -> ContractTableView {
        ContractTableView {
            title: self.title.clone(),
            rows: self.current_rows().iter().map(ContractRow::from).collect(),
            page: self.pagination.current_page,
            total_pages: self.pagination.total_pages(),
            total_contracts: self.contracts.len(),
            showing: format!("{} contracts", self.pagination.showing_label()),
            previous_enabled: self.pagination.has_previous(),
            next_enabled: self.pagination.has_next(),
        }
    }
}

impl fmt::Display for ContractTableView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if self.rows.is_empty() {
            writeln!(f, "  {}", NO_DATA)?;
        } else {
            writeln!(f, "  {:>3}  {:<30} {:<30} {:>16}  {:<10}", "#", "Company", "Agency", "Amount", "Date")?;
            for (i, row) in self.rows.iter().enumerate() {
                writeln!(
                    f,
                    "  {:>3}  {:<30} {:<30} {:>16}  {:<10}",
                    i + 1,
                    clip(&row.company, 30),
                    clip(&row.agency, 30),
                    row.amount,
                    row.date
                )?;
            }
        }
        writeln!(
            f,
            "  {} | page {}/{} | {} {}",
            self.showing,
            self.page,
            self.total_pages,
            if self.previous_enabled { "[Previous]" } else { "(Previous)" },
            if self.next_enabled { "[Next]" } else { "(Next)" },
        )
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", head)
    } else {
        text.to_string()
    }
}
