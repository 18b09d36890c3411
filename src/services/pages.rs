// src/services/pages.rs
//
// Page loaders. Each one issues its queries concurrently, waits for all of
// them, and turns the envelopes into a page state. A failed secondary query
// only empties its own section; stats failing fails the whole dashboard.
use chrono::Utc;
use log::{info, warn};

use crate::models::{ApiResponse, Contract, NaicsCode, NaicsRecipient, SearchFilters, SpendingSort, SummaryParams};
use crate::services::api::ApiClient;
use crate::views::contract_table::TableEvent;
use crate::views::dashboard::{DashboardData, DashboardView};
use crate::views::naics::{NaicsPageView, NaicsRecipientsView};
use crate::views::search_bar::SearchQuery;
use crate::views::PageState;

pub const LOADING_DASHBOARD: &str = "LOADING DEFENSE-TECH DATA...";
pub const LOADING_NAICS: &str = "LOADING NAICS DATA...";

pub const DASHBOARD_CHART_LIMIT: u32 = 10;
pub const DASHBOARD_CONTRACT_LIMIT: u32 = 50;
pub const SEARCH_LIMIT: u32 = 100;
pub const NAICS_RECIPIENT_LIMIT: u32 = 100;

pub fn dashboard_contract_filters() -> SearchFilters {
    SearchFilters {
        limit: Some(DASHBOARD_CONTRACT_LIMIT),
        defense_only: Some(true),
        ..Default::default()
    }
}

fn or_default<T: Default>(section: &str, response: ApiResponse<T>) -> T {
    if response.success {
        response.data.unwrap_or_default()
    } else {
        warn!(
            "Showing empty {}: {}",
            section,
            response.error.as_deref().unwrap_or("unknown error")
        );
        T::default()
    }
}

pub async fn fetch_dashboard(client: &ApiClient) -> PageState<DashboardData> {
    let summary_params = SummaryParams {
        limit: Some(DASHBOARD_CHART_LIMIT),
        sort: Some(SpendingSort::TotalValue),
    };
    let contract_filters = dashboard_contract_filters();

    let (stats, companies, agencies, contracts) = tokio::join!(
        client.get_stats(),
        client.get_spending_summary(&summary_params),
        client.get_agencies_spending(Some(DASHBOARD_CHART_LIMIT)),
        client.search_contracts(&contract_filters),
    );

    if !stats.success {
        let reason = stats.error.unwrap_or_else(|| "unknown error".to_string());
        warn!("Dashboard stats unavailable: {}", reason);
        return PageState::error(format!("Failed to load dashboard data. {}", reason));
    }
    let stats = match stats.data {
        Some(stats) => stats,
        None => return PageState::empty(),
    };

    let data = DashboardData {
        stats,
        companies: or_default("contractor chart", companies),
        agencies: or_default("agency chart", agencies),
        contracts: or_default("contract table", contracts),
    };
    info!(
        "Dashboard loaded: {} companies, {} agencies, {} contracts",
        data.companies.len(),
        data.agencies.len(),
        data.contracts.len()
    );
    PageState::Ready { view: data }
}

/// Dashboard with its contract table moved to `page` (clamped).
pub async fn load_dashboard(client: &ApiClient, page: usize) -> PageState<DashboardView> {
    fetch_dashboard(client).await.map(|data| {
        let mut table = DashboardView::contract_table(&data);
        table.handle(TableEvent::GoToPage(page));
        DashboardView::new(&data, &table, Utc::now())
    })
}

/// Looks a contract up in the slice the dashboard table shows.
pub async fn find_dashboard_contract(client: &ApiClient, contract_id: &str) -> ApiResponse<Option<Contract>> {
    let response = client.search_contracts(&dashboard_contract_filters()).await;
    if !response.success {
        return ApiResponse::failure(response.error.unwrap_or_else(|| "Failed to search contracts".to_string()));
    }
    let found = response
        .data
        .unwrap_or_default()
        .into_iter()
        .find(|c| c.contract_id == contract_id);
    ApiResponse::ok(found)
}

pub async fn search_contracts(client: &ApiClient, query: &SearchQuery) -> ApiResponse<Vec<Contract>> {
    let filters = query.to_filters(SearchFilters {
        limit: Some(SEARCH_LIMIT),
        ..Default::default()
    });
    let mut response = client.search_contracts(&filters).await;
    if let Some(rows) = response.data.as_mut() {
        rows.retain(|c| query.matches(c));
        response.count = Some(rows.len() as u64);
    }
    response
}

pub async fn load_naics_page(client: &ApiClient) -> PageState<NaicsPageView> {
    let result = client.get_naics_summary().await;
    if result.success {
        PageState::Ready { view: NaicsPageView::new(&result.data.unwrap_or_default()) }
    } else {
        PageState::error(result.error.unwrap_or_else(|| "Failed to load NAICS data".to_string()))
    }
}

/// Sorts by rank and reports whether ranks run 1, 2, 3... without gaps.
pub fn order_by_rank(recipients: &mut [NaicsRecipient]) -> bool {
    recipients.sort_by_key(|r| r.rank);
    let contiguous = recipients
        .iter()
        .enumerate()
        .all(|(i, r)| r.rank as usize == i + 1);
    if !contiguous {
        warn!("NAICS recipient ranks are not contiguous from 1");
    }
    contiguous
}

/// Header figures for a code missing from the summary, taken from its recipients.
fn naics_from_recipients(code: &str, recipients: &[NaicsRecipient]) -> NaicsCode {
    let total_spending: f64 = recipients.iter().map(|r| r.amount).sum();
    let count = recipients.len();
    NaicsCode {
        code: code.to_string(),
        description: recipients.first().map(|r| r.naics_description.clone()).unwrap_or_default(),
        total_recipients: count as u64,
        total_spending,
        avg_spending_per_recipient: if count > 0 { total_spending / count as f64 } else { 0.0 },
        max_recipient_amount: recipients.iter().map(|r| r.amount).fold(0.0, f64::max),
        earliest_data: recipients.first().map(|r| r.time_period_start.clone()).unwrap_or_default(),
        latest_data: recipients.first().map(|r| r.time_period_end.clone()).unwrap_or_default(),
    }
}

pub async fn load_naics_recipients(client: &ApiClient, code: &str) -> PageState<NaicsRecipientsView> {
    let (summary, recipients) = tokio::join!(
        client.get_naics_summary(),
        client.get_naics_recipients(code, Some(NAICS_RECIPIENT_LIMIT)),
    );

    if !recipients.success {
        return PageState::error(recipients.error.unwrap_or_else(|| "Failed to load recipients".to_string()));
    }
    let mut rows = recipients.data.unwrap_or_default();
    order_by_rank(&mut rows);

    let naics = summary
        .into_data()
        .and_then(|codes| codes.into_iter().find(|c| c.code == code))
        .unwrap_or_else(|| naics_from_recipients(code, &rows));

    PageState::Ready { view: NaicsRecipientsView::new(&naics, &rows) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(rank: u32, amount: f64) -> NaicsRecipient {
        NaicsRecipient {
            naics_description: "Aircraft Manufacturing".to_string(),
            recipient_name: format!("R{}", rank),
            amount,
            rank,
            ..Default::default()
        }
    }

    #[test]
    fn ranks_are_sorted_and_checked() {
        let mut rows = vec![recipient(2, 5.0), recipient(1, 9.0), recipient(3, 1.0)];
        assert!(order_by_rank(&mut rows));
        assert_eq!(rows[0].rank, 1);

        let mut gapped = vec![recipient(1, 9.0), recipient(3, 1.0)];
        assert!(!order_by_rank(&mut gapped));
    }

    #[test]
    fn header_from_recipients_when_summary_lacks_code() {
        let rows = vec![recipient(1, 30.0), recipient(2, 10.0)];
        let naics = naics_from_recipients("336411", &rows);
        assert_eq!(naics.code, "336411");
        assert_eq!(naics.description, "Aircraft Manufacturing");
        assert_eq!(naics.total_recipients, 2);
        assert_eq!(naics.total_spending, 40.0);
        assert_eq!(naics.avg_spending_per_recipient, 20.0);
        assert_eq!(naics.max_recipient_amount, 30.0);
    }

    #[test]
    fn dashboard_filters_are_defense_only() {
        let filters = dashboard_contract_filters();
        assert_eq!(filters.limit, Some(50));
        assert_eq!(filters.defense_only, Some(true));
        assert_eq!(filters.company, None);
    }
}
