// src/handlers/health.rs
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;
use log::debug;

use crate::models::{ApiResponse, HealthStatus};
use crate::services::api::ApiClient;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    upstream: ApiResponse<HealthStatus>,
}

pub async fn get_health(client: Arc<ApiClient>) -> Result<Json, Rejection> {
    let upstream = client.health_check().await;
    debug!("Upstream health: {:?}", upstream);

    Ok(warp::reply::json(&HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
        upstream,
    }))
}
