// src/handlers/contracts.rs
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::{Rejection, Reply};
use log::{error, info};

use crate::models::Contract;
use crate::services::api::ApiClient;
use crate::services::export::contracts_to_csv;
use crate::services::pages::{find_dashboard_contract, search_contracts};
use crate::views::contract_modal::ContractModalView;
use crate::views::contract_table::{ContractTable, TableEvent};
use crate::views::search_bar::{SearchQuery, SearchScope};
use super::error::ApiError;

pub const SEARCH_RESULTS_TITLE: &str = "SEARCH RESULTS";

#[derive(Debug, Default, Deserialize)]
pub struct ContractsQuery {
    pub q: Option<String>,
    pub scope: Option<SearchScope>,
    pub page: Option<usize>,
}

impl ContractsQuery {
    fn search(&self) -> SearchQuery {
        SearchQuery::new(self.q.as_deref().unwrap_or(""), self.scope.unwrap_or_default())
    }
}

pub fn decode_path_param(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

async fn matching_contracts(query: &ContractsQuery, client: &ApiClient) -> Result<Vec<Contract>, Rejection> {
    let response = search_contracts(client, &query.search()).await;
    if !response.success {
        let message = response.error.unwrap_or_else(|| "Failed to search contracts".to_string());
        error!("Contract search failed: {}", message);
        return Err(warp::reject::custom(ApiError::upstream(message)));
    }
    Ok(response.data.unwrap_or_default())
}

pub async fn get_contracts(query: ContractsQuery, client: Arc<ApiClient>) -> Result<Json, Rejection> {
    info!("Handling contract search {:?}", query);

    let contracts = matching_contracts(&query, &client).await?;
    let mut table = ContractTable::new(SEARCH_RESULTS_TITLE, contracts);
    table.handle(TableEvent::GoToPage(query.page.unwrap_or(1)));

    Ok(warp::reply::json(&table.view()))
}

pub async fn export_contracts(query: ContractsQuery, client: Arc<ApiClient>) -> Result<impl Reply, Rejection> {
    info!("Handling contract CSV export {:?}", query);

    let contracts = matching_contracts(&query, &client).await?;
    let csv = contracts_to_csv(&contracts).map_err(|e| {
        error!("Failed to render CSV: {}", e);
        warp::reject::custom(ApiError::upstream(e.to_string()))
    })?;

    Ok(warp::reply::with_header(
        warp::reply::with_header(csv, "content-type", "text/csv; charset=utf-8"),
        "content-disposition",
        "attachment; filename=\"contracts.csv\"",
    ))
}

pub async fn get_contract(raw_id: String, client: Arc<ApiClient>) -> Result<Json, Rejection> {
    let contract_id = decode_path_param(&raw_id);
    info!("Handling request for contract {}", contract_id);

    let response = find_dashboard_contract(&client, &contract_id).await;
    if !response.success {
        let message = response.error.unwrap_or_else(|| "Failed to load contracts".to_string());
        return Err(warp::reject::custom(ApiError::upstream(message)));
    }

    match response.data.flatten() {
        Some(contract) => Ok(warp::reply::json(&ContractModalView::from(&contract))),
        None => Err(warp::reject::custom(ApiError::not_found(format!(
            "Contract {} not found",
            contract_id
        )))),
    }
}
