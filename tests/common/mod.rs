// Stub upstream API for integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use warp::http::Response;
use warp::path::FullPath;
use warp::Filter;

#[derive(Clone)]
struct Canned {
    status: u16,
    content_type: &'static str,
    body: String,
}

#[derive(Default)]
pub struct StubBuilder {
    routes: HashMap<String, Canned>,
}

impl StubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, body: Value) -> Self {
        self.json_with_status(path, 200, body)
    }

    pub fn json_with_status(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes.insert(
            path.to_string(),
            Canned { status, content_type: "application/json", body: body.to_string() },
        );
        self
    }

    pub fn text(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Canned { status, content_type: "text/html", body: body.to_string() },
        );
        self
    }

    /// Serves the canned routes on 127.0.0.1 with an ephemeral port.
    pub fn spawn(self) -> Stub {
        let routes = Arc::new(self.routes);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();

        let filter = warp::path::full()
            .and(warp::query::raw().or(warp::any().map(String::new)).unify())
            .map(move |path: FullPath, query: String| {
                let path = path.as_str().to_string();
                log.lock().unwrap().push(if query.is_empty() {
                    path.clone()
                } else {
                    format!("{}?{}", path, query)
                });

                let canned = routes.get(&path).cloned().unwrap_or(Canned {
                    status: 404,
                    content_type: "text/plain",
                    body: "Not Found".to_string(),
                });
                Response::builder()
                    .status(canned.status)
                    .header("content-type", canned.content_type)
                    .body(canned.body)
                    .unwrap()
            });

        let (addr, server) = warp::serve(filter).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        Stub { base_url: format!("http://{}", addr), requests }
    }
}

pub struct Stub {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn contract_json(i: usize, company: &str, agency: &str, value: f64, keywords: &[&str]) -> Value {
    json!({
        "contract_id": format!("CONT_AWD_{}", i),
        "company": company,
        "agency": agency,
        "contract_value": value,
        "contract_date": "2024-02-01",
        "description": format!("Contract number {}", i),
        "keywords": keywords,
        "is_defense_related": true
    })
}

pub fn contracts_payload(n: usize) -> Value {
    let data: Vec<Value> = (0..n)
        .map(|i| contract_json(i, &format!("Company {}", i % 4), "Department of the Army", 1000.0 * (i + 1) as f64, &[]))
        .collect();
    json!({ "count": n, "data": data })
}

pub fn stats_payload() -> Value {
    json!({
        "success": true,
        "data": {
            "total_spending_usd": "1300000000",
            "total_defense_contracts": 4521,
            "num_companies": 120,
            "num_agencies": 14,
            "avg_contract_value_usd": 287547.2,
            "quarterly_trend": []
        }
    })
}
