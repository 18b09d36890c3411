// src/handlers/naics.rs
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;
use log::{info, warn};

use crate::services::api::{validate_naics_code, ApiClient};
use crate::services::pages::{load_naics_page, load_naics_recipients};
use super::error::ApiError;

pub async fn get_naics(client: Arc<ApiClient>) -> Result<Json, Rejection> {
    info!("Handling request for NAICS summary");
    let state = load_naics_page(&client).await;
    Ok(warp::reply::json(&state))
}

pub async fn get_naics_recipients(code: String, client: Arc<ApiClient>) -> Result<Json, Rejection> {
    info!("Handling request for NAICS {} recipients", code);

    if let Err(e) = validate_naics_code(&code) {
        warn!("Rejecting NAICS request: {}", e);
        return Err(warp::reject::custom(ApiError::bad_request(e.to_string())));
    }

    let state = load_naics_recipients(&client, &code).await;
    Ok(warp::reply::json(&state))
}
