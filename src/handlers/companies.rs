// src/handlers/companies.rs
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;
use log::info;

use crate::services::api::ApiClient;
use super::contracts::decode_path_param;

/// Upstream company envelope, passed through whether or not it succeeded.
pub async fn get_company(raw_name: String, client: Arc<ApiClient>) -> Result<Json, Rejection> {
    let name = decode_path_param(&raw_name);
    info!("Handling request for company {}", name);

    let details = client.get_company_details(&name).await;
    Ok(warp::reply::json(&details))
}
