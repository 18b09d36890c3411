// src/routes.rs
use std::sync::Arc;
use warp::reject::Rejection;
use crate::handlers::{companies::get_company, contracts::export_contracts, contracts::get_contract,
                     contracts::get_contracts, contracts::ContractsQuery, dashboard::get_dashboard,
                     dashboard::PageQuery, health::get_health, naics::get_naics, naics::get_naics_recipients};
use crate::services::api::ApiClient;
use log::{info, error};

use std::convert::Infallible;
use warp::http::StatusCode;
use warp::{Filter, Reply};
use crate::handlers::error::ApiError;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status_code();
        message = api_error.message.clone();
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = e.to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        error!("Unhandled rejection: {:?}", err);
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(client: Arc<ApiClient>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let client_filter = warp::any().map(move || client.clone());

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(warp::query::<PageQuery>())
        .and(client_filter.clone())
        .and_then(get_dashboard);

    let export_route = warp::path!("api" / "v1" / "contracts" / "export.csv")
        .and(warp::get())
        .and(warp::query::<ContractsQuery>())
        .and(client_filter.clone())
        .and_then(export_contracts);

    let contracts_route = warp::path!("api" / "v1" / "contracts")
        .and(warp::get())
        .and(warp::query::<ContractsQuery>())
        .and(client_filter.clone())
        .and_then(get_contracts);

    let contract_route = warp::path!("api" / "v1" / "contracts" / String)
        .and(warp::get())
        .and(client_filter.clone())
        .and_then(get_contract);

    let company_route = warp::path!("api" / "v1" / "companies" / String)
        .and(warp::get())
        .and(client_filter.clone())
        .and_then(get_company);

    let naics_route = warp::path!("api" / "v1" / "naics")
        .and(warp::get())
        .and(client_filter.clone())
        .and_then(get_naics);

    let naics_recipients_route = warp::path!("api" / "v1" / "naics" / String / "recipients")
        .and(warp::get())
        .and(client_filter.clone())
        .and_then(get_naics_recipients);

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(client_filter.clone())
        .and_then(get_health);

    info!("All routes configured successfully.");

    dashboard_route
        .or(export_route)
        .or(contracts_route)
        .or(contract_route)
        .or(company_route)
        .or(naics_route)
        .or(naics_recipients_route)
        .or(health_route)
        .recover(handle_rejection)
}
