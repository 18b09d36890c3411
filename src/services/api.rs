// src/services/api.rs
//
// Client for the defense-spending API. Every public call resolves to an
// `ApiResponse`; transport failures, non-JSON bodies and unexpected shapes all
// come back as `success: false` with a message instead of an `Err`.
use log::{debug, error, info, warn};
use regex::Regex;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;
use crate::models::{
    AgencySpending, ApiResponse, Contract, HealthStatus, NaicsCode, NaicsRecipient,
    SearchFilters, SpendingSummary, Stats, SummaryParams,
};
use crate::services::normalize::{self, rows_from_payload};
use crate::BoxError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// NAICS codes are 2 to 6 digit numeric strings.
pub fn validate_naics_code(code: &str) -> Result<(), BoxError> {
    let re = Regex::new(r"^\d{2,6}$")?;
    if re.is_match(code) {
        Ok(())
    } else {
        Err(format!("Invalid NAICS code: {:?}", code).into())
    }
}

fn settle<T>(context: &str, result: Result<ApiResponse<T>, BoxError>) -> ApiResponse<T> {
    result.unwrap_or_else(|e| {
        error!("{}: {}", context, e);
        ApiResponse::failure(format!("{}: {}", context, e))
    })
}

/// `{status, data, count}` payloads: success hinges on `status == "success"`.
fn naics_envelope<T>(json: &Value, decode: fn(&Value) -> T) -> Result<ApiResponse<Vec<T>>, BoxError> {
    let rows = rows_from_payload(json, decode)?;
    let count = normalize::payload_count(json);

    if normalize::naics_status_is_success(json) {
        return Ok(ApiResponse::ok(rows).with_count(count));
    }

    let status = json.get("status").cloned().unwrap_or(Value::Null);
    warn!("NAICS endpoint reported status {}", status);
    Ok(ApiResponse {
        success: false,
        data: Some(rows),
        error: Some(format!("NAICS endpoint reported status {}", status)),
        count,
    })
}

/// Relays a decoded body without reading its fields. A boolean `success` and a
/// string `error` are honoured when present; `data` is lifted out when present,
/// otherwise the whole body is the data.
fn passthrough_envelope(json: Value) -> ApiResponse<Value> {
    let count = normalize::payload_count(&json);
    let success = json.get("success").and_then(Value::as_bool).unwrap_or(true);
    let error = json.get("error").and_then(Value::as_str).map(str::to_string);
    let data = match json.get("data").cloned() {
        Some(data) => Some(data),
        None if success => Some(json),
        None => None,
    };
    ApiResponse { success, data, error, count }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, BoxError> {
        // Fail early on a base URL we could never join paths onto.
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(format!("API base URL cannot be a base: {}", base_url).into());
        }

        let client = Client::builder()
            .user_agent(concat!("defense-tech-tracker/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, BoxError> {
        Self::new(&config.api_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins percent-encoded path segments onto the base URL.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, BoxError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| "API base URL cannot be a base")?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    async fn get_json(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value, BoxError> {
        let url = self.endpoint(segments, query)?;
        info!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            // The body still decides the outcome; NAICS payloads carry their own status.
            warn!("{} answered HTTP {}", url, status);
        }

        let json = response.json::<Value>().await?;
        debug!("Decoded JSON from {}", url);
        Ok(json)
    }

    async fn fetch_stats(&self) -> Result<ApiResponse<Stats>, BoxError> {
        let json = self.get_json(&["api", "stats"], &[]).await?;
        Ok(ApiResponse::ok(normalize::stats_from_payload(&json)?))
    }

    async fn fetch_rows<T>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        decode: fn(&Value) -> T,
    ) -> Result<ApiResponse<Vec<T>>, BoxError> {
        let json = self.get_json(segments, query).await?;
        let rows = rows_from_payload(&json, decode)?;
        Ok(ApiResponse::ok(rows).with_count(normalize::payload_count(&json)))
    }

    async fn fetch_naics_rows<T>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
        decode: fn(&Value) -> T,
    ) -> Result<ApiResponse<Vec<T>>, BoxError> {
        let json = self.get_json(segments, query).await?;
        naics_envelope(&json, decode)
    }

    async fn fetch_company_details(&self, name: &str) -> Result<ApiResponse<Value>, BoxError> {
        let json = self.get_json(&["api", "company", name], &[]).await?;
        Ok(passthrough_envelope(json))
    }

    async fn fetch_health(&self) -> Result<ApiResponse<HealthStatus>, BoxError> {
        let json = self.get_json(&["health"], &[]).await?;
        Ok(ApiResponse::ok(serde_json::from_value::<HealthStatus>(json)?))
    }

    /// Accepts both the `{success, data}` envelope and a bare stats object.
    pub async fn get_stats(&self) -> ApiResponse<Stats> {
        settle("Failed to fetch stats", self.fetch_stats().await)
    }

    pub async fn get_spending_summary(&self, params: &SummaryParams) -> ApiResponse<Vec<SpendingSummary>> {
        let result = self
            .fetch_rows(&["api", "spending", "summary"], &params.to_query(), normalize::company_from_value)
            .await;
        settle("Failed to fetch spending summary", result)
    }

    pub async fn get_agencies_spending(&self, limit: Option<u32>) -> ApiResponse<Vec<AgencySpending>> {
        let query: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        let result = self
            .fetch_rows(&["api", "spending", "agencies"], &query, normalize::agency_from_value)
            .await;
        settle("Failed to fetch agencies spending", result)
    }

    pub async fn search_contracts(&self, filters: &SearchFilters) -> ApiResponse<Vec<Contract>> {
        let result = self
            .fetch_rows(&["api", "contracts", "search"], &filters.to_query(), normalize::contract_from_value)
            .await;
        settle("Failed to search contracts", result)
    }

    /// Passed through as the backend sends it; no field reconciliation.
    /// `normalize::company_details_from_value` reads it leniently for display.
    pub async fn get_company_details(&self, name: &str) -> ApiResponse<Value> {
        settle("Failed to fetch company details", self.fetch_company_details(name).await)
    }

    pub async fn get_naics_summary(&self) -> ApiResponse<Vec<NaicsCode>> {
        let result = self
            .fetch_naics_rows(&["api", "naics", "summary"], &[], normalize::naics_code_from_value)
            .await;
        settle("Failed to fetch NAICS summary", result)
    }

    pub async fn get_naics_recipients(&self, code: &str, limit: Option<u32>) -> ApiResponse<Vec<NaicsRecipient>> {
        if let Err(e) = validate_naics_code(code) {
            return settle("Failed to fetch NAICS recipients", Err(e));
        }
        let query: Vec<(&str, String)> = limit.map(|l| ("limit", l.to_string())).into_iter().collect();
        let result = self
            .fetch_naics_rows(&["api", "naics", code, "recipients"], &query, normalize::naics_recipient_from_value)
            .await;
        settle("Failed to fetch NAICS recipients", result)
    }

    /// Upstream liveness payload, passed through.
    pub async fn health_check(&self) -> ApiResponse<HealthStatus> {
        settle("Health check failed", self.fetch_health().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_path_segments() {
        let client = ApiClient::new("https://api.example.com/").unwrap();
        let url = client.endpoint(&["api", "company", "Acme Corp/West"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/company/Acme%20Corp%2FWest");
    }

    #[test]
    fn endpoint_keeps_base_path_and_query() {
        let client = ApiClient::new("http://localhost:8000/v2").unwrap();
        let url = client
            .endpoint(&["api", "spending", "agencies"], &[("limit", "10".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/v2/api/spending/agencies?limit=10");
    }

    #[test]
    fn endpoint_without_query_has_no_question_mark() {
        let client = ApiClient::new("http://localhost:8000").unwrap();
        let url = client.endpoint(&["api", "stats"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/stats");
    }

    #[test]
    fn naics_codes_are_validated() {
        assert!(validate_naics_code("541715").is_ok());
        assert!(validate_naics_code("54").is_ok());
        assert!(validate_naics_code("5").is_err());
        assert!(validate_naics_code("54a715").is_err());
        assert!(validate_naics_code("../stats").is_err());
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn passthrough_keeps_body_untouched() {
        let json = serde_json::json!({"count": 1, "data": {"name": "Acme", "total_contract_value": "1500"}});
        let envelope = passthrough_envelope(json);
        assert!(envelope.success);
        assert_eq!(envelope.count, Some(1));
        assert_eq!(envelope.data.unwrap()["total_contract_value"], "1500");

        let bare = serde_json::json!({"name": "Acme"});
        assert_eq!(passthrough_envelope(bare.clone()).data, Some(bare));

        let failed = passthrough_envelope(serde_json::json!({"success": false, "error": "Company not found"}));
        assert!(!failed.success);
        assert!(failed.data.is_none());
        assert_eq!(failed.error.as_deref(), Some("Company not found"));
    }

    #[test]
    fn naics_envelope_without_success_status_keeps_rows() {
        let json = serde_json::json!({"status": "error", "data": [{"code": "541715"}], "count": 1});
        let envelope = naics_envelope(&json, normalize::naics_code_from_value).unwrap();
        assert!(!envelope.success);
        assert_eq!(envelope.data.as_ref().map(Vec::len), Some(1));
        assert!(envelope.error.unwrap().contains("error"));
    }
}
