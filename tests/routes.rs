mod common;

use common::{contract_json, contracts_payload, stats_payload, StubBuilder};
use defense_tech_tracker::routes::routes;
use defense_tech_tracker::services::api::ApiClient;
use serde_json::{json, Value};
use std::sync::Arc;

fn full_dashboard_stub(contracts: usize) -> StubBuilder {
    StubBuilder::new()
        .json("/api/stats", stats_payload())
        .json(
            "/api/spending/summary",
            json!({"count": 1, "data": [{"company": "Company 0", "total_value": 5_000_000}]}),
        )
        .json(
            "/api/spending/agencies",
            json!({"count": 1, "data": [{"agency": "Department of the Army", "total_value": 9_000_000}]}),
        )
        .json("/api/contracts/search", contracts_payload(contracts))
}

async fn get(base_url: &str, path: &str) -> (u16, Value) {
    let client = ApiClient::new(base_url).unwrap();
    let res = warp::test::request()
        .method("GET")
        .path(path)
        .reply(&routes(Arc::new(client)))
        .await;
    let body = serde_json::from_slice(res.body()).unwrap_or(Value::Null);
    (res.status().as_u16(), body)
}

#[tokio::test]
async fn dashboard_paginates_contracts() {
    let stub = full_dashboard_stub(45).spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/dashboard?page=3").await;

    assert_eq!(status, 200);
    assert_eq!(body["state"], "ready");
    let table = &body["view"]["contracts"];
    assert_eq!(table["page"], 3);
    assert_eq!(table["total_pages"], 3);
    assert_eq!(table["rows"].as_array().unwrap().len(), 5);
    assert_eq!(table["rows"][0]["contract_id"], "CONT_AWD_40");
    assert_eq!(table["next_enabled"], false);
    assert_eq!(table["previous_enabled"], true);
    assert_eq!(table["showing"], "Showing 41-45 of 45 contracts");
    assert_eq!(body["view"]["agencies_chart"]["bars"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_page_out_of_range_is_clamped() {
    let stub = full_dashboard_stub(45).spawn();
    let (_, body) = get(&stub.base_url, "/api/v1/dashboard?page=99").await;
    assert_eq!(body["view"]["contracts"]["page"], 3);
}

#[tokio::test]
async fn dashboard_survives_a_failed_section() {
    let stub = StubBuilder::new()
        .json("/api/stats", stats_payload())
        .json("/api/spending/summary", json!({"data": []}))
        .text("/api/spending/agencies", 500, "Internal Server Error")
        .json("/api/contracts/search", contracts_payload(3))
        .spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/dashboard").await;

    assert_eq!(status, 200);
    assert_eq!(body["state"], "ready");
    assert!(body["view"]["agencies_chart"]["bars"].as_array().unwrap().is_empty());
    assert_eq!(body["view"]["contracts"]["total_contracts"], 3);
}

#[tokio::test]
async fn dashboard_without_stats_is_a_page_error() {
    let stub = StubBuilder::new()
        .json("/api/contracts/search", contracts_payload(3))
        .spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/dashboard").await;

    assert_eq!(status, 200);
    assert_eq!(body["state"], "error");
    assert!(body["message"].as_str().unwrap().starts_with("Failed to load dashboard data."));
}

#[tokio::test]
async fn contract_scope_filters_locally() {
    let stub = full_dashboard_stub(45).spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/contracts?q=number%201&scope=contract").await;

    assert_eq!(status, 200);
    // "Contract number 1" and "Contract number 10" through 19
    assert_eq!(body["total_contracts"], 11);
    assert_eq!(body["title"], "SEARCH RESULTS");
}

#[tokio::test]
async fn contractor_scope_goes_upstream() {
    let stub = full_dashboard_stub(2).spawn();

    let (status, _) = get(&stub.base_url, "/api/v1/contracts?q=Acme").await;

    assert_eq!(status, 200);
    assert_eq!(stub.requests(), vec!["/api/contracts/search?company=Acme&limit=100"]);
}

#[tokio::test]
async fn contract_detail_and_missing_contract() {
    let stub = StubBuilder::new()
        .json(
            "/api/contracts/search",
            json!({"data": [contract_json(7, "Acme", "Navy", 2_500_000_000.0, &["hypersonic"])]}),
        )
        .spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/contracts/CONT_AWD_7").await;
    assert_eq!(status, 200);
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["source_url"], "https://www.usaspending.gov/award/CONT_AWD_7");

    let (status, body) = get(&stub.base_url, "/api/v1/contracts/CONT_AWD_8").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Contract CONT_AWD_8 not found");
}

#[tokio::test]
async fn upstream_outage_on_contract_lookup_is_bad_gateway() {
    let (status, body) = get("http://127.0.0.1:1", "/api/v1/contracts/CONT_AWD_1").await;
    assert_eq!(status, 502);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn export_serves_csv() {
    let stub = full_dashboard_stub(2).spawn();
    let client = ApiClient::new(&stub.base_url).unwrap();

    let res = warp::test::request()
        .path("/api/v1/contracts/export.csv")
        .reply(&routes(Arc::new(client)))
        .await;

    assert_eq!(res.status(), 200);
    assert_eq!(res.headers()["content-type"], "text/csv; charset=utf-8");
    let body = String::from_utf8(res.body().to_vec()).unwrap();
    assert!(body.starts_with("contract_id,company,agency"));
    assert_eq!(body.lines().count(), 3);
}

#[tokio::test]
async fn bad_naics_code_is_rejected() {
    let stub = StubBuilder::new().spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/naics/12ab/recipients").await;

    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap().contains("Invalid NAICS code"));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn naics_recipients_are_ranked() {
    let stub = StubBuilder::new()
        .json(
            "/api/naics/summary",
            json!({"status": "success", "data": [{"code": "541715", "description": "R&D in Physical Sciences", "total_spending": 1_000_000}]}),
        )
        .json(
            "/api/naics/541715/recipients",
            json!({"status": "success", "data": [
                {"recipient_name": "Second", "amount": 100, "rank": 2},
                {"recipient_name": "First", "amount": 900, "rank": 1, "recipient_uei": "ABC123"}
            ]}),
        )
        .spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/naics/541715/recipients").await;

    assert_eq!(status, 200);
    assert_eq!(body["state"], "ready");
    let rows = body["view"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["name"], "First");
    assert_eq!(rows[0]["rank"], "#1");
    assert_eq!(rows[0]["uei"], "ABC123");
    assert_eq!(rows[1]["uei"], "N/A");
}

#[tokio::test]
async fn company_profile_is_relayed_as_sent() {
    let stub = StubBuilder::new()
        .json(
            "/api/company/Acme%20Corp",
            json!({"count": 1, "data": {"name": "Acme Corp", "avg_contract_value": "n/a"}}),
        )
        .spawn();

    let (status, body) = get(&stub.base_url, "/api/v1/companies/Acme%20Corp").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["avg_contract_value"], "n/a");
    assert_eq!(stub.requests(), vec!["/api/company/Acme%20Corp"]);
}

#[tokio::test]
async fn health_reports_upstream_failure_without_failing() {
    let (status, body) = get("http://127.0.0.1:1", "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["upstream"]["success"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let stub = StubBuilder::new().spawn();
    let (status, body) = get(&stub.base_url, "/api/v1/nothing").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Not Found");
}
