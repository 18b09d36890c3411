// src/handlers/dashboard.rs
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;
use log::info;

use crate::services::api::ApiClient;
use crate::services::pages::load_dashboard;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

pub async fn get_dashboard(query: PageQuery, client: Arc<ApiClient>) -> Result<Json, Rejection> {
    let page = query.page.unwrap_or(1);
    info!("Handling request for dashboard page {}", page);

    // Page-level failures are part of the payload, not an HTTP error.
    let state = load_dashboard(&client, page).await;
    Ok(warp::reply::json(&state))
}
