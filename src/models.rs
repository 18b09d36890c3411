// src/models.rs
use serde::{Serialize, Deserialize};

pub const USASPENDING_AWARD_URL: &str = "https://www.usaspending.gov/award";

/// Uniform result wrapper handed to every caller of the API client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    // Missing Option fields decode as None; a field-level `default` would demand `T: Default`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            count: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
            count: None,
        }
    }

    pub fn with_count(mut self, count: Option<u64>) -> Self {
        self.count = count;
        self
    }

    /// The payload when the call succeeded, `None` otherwise.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: String,
    pub company: String,
    pub agency: String,
    pub contract_value: f64,
    pub contract_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_defense_related: bool,
}

impl Contract {
    /// Provenance link for the award on USAspending.gov.
    pub fn source_url(&self) -> String {
        format!("{}/{}", USASPENDING_AWARD_URL, self.contract_id)
    }
}

/// Per-recipient aggregate, also served as the spending summary rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub total_contracts: u64,
    pub total_contract_value: f64,
    pub avg_contract_value: f64,
    pub latest_contract_date: String,
    pub num_agencies: u64,
    pub federal_percentage: f64,
}

pub type SpendingSummary = Company;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetails {
    #[serde(flatten)]
    pub company: Company,
    #[serde(default)]
    pub contracts: Vec<Contract>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgencySpending {
    pub agency: String,
    pub total_contracts: u64,
    pub total_value: f64,
    pub avg_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyData {
    pub quarter: String,
    pub spending: f64,
    pub contracts: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_spending_usd: f64,
    pub total_defense_contracts: u64,
    pub num_companies: u64,
    pub num_agencies: u64,
    pub avg_contract_value_usd: f64,
    #[serde(default)]
    pub quarterly_trend: Vec<QuarterlyData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NaicsCode {
    pub code: String,
    pub description: String,
    pub total_recipients: u64,
    pub total_spending: f64,
    pub avg_spending_per_recipient: f64,
    pub max_recipient_amount: f64,
    pub earliest_data: String,
    pub latest_data: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NaicsRecipient {
    pub naics_code: String,
    pub naics_description: String,
    pub recipient_name: String,
    pub recipient_uei: Option<String>,
    pub amount: f64,
    pub rank: u32,
    pub time_period_start: String,
    pub time_period_end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingSort {
    TotalValue,
    TotalContracts,
}

impl SpendingSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingSort::TotalValue => "total_value",
            SpendingSort::TotalContracts => "total_contracts",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryParams {
    pub limit: Option<u32>,
    pub sort: Option<SpendingSort>,
}

impl SummaryParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(sort) = self.sort {
            query.push(("sort", sort.as_str().to_string()));
        }
        query
    }
}

/// Contract search filters. Only fields that are set end up in the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub company: Option<String>,
    pub agency: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub defense_only: Option<bool>,
    pub limit: Option<u32>,
}

impl SearchFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(company) = &self.company {
            query.push(("company", company.clone()));
        }
        if let Some(agency) = &self.agency {
            query.push(("agency", agency.clone()));
        }
        if let Some(min_value) = self.min_value {
            query.push(("min_value", min_value.to_string()));
        }
        if let Some(max_value) = self.max_value {
            query.push(("max_value", max_value.to_string()));
        }
        if let Some(start_date) = &self.start_date {
            query.push(("start_date", start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            query.push(("end_date", end_date.clone()));
        }
        if let Some(defense_only) = self.defense_only {
            query.push(("defense_only", defense_only.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_no_query() {
        assert!(SearchFilters::default().to_query().is_empty());
        assert!(SummaryParams::default().to_query().is_empty());
    }

    #[test]
    fn only_defined_filters_are_sent() {
        let filters = SearchFilters {
            agency: Some("Department of Defense".to_string()),
            min_value: Some(1000.0),
            defense_only: Some(false),
            limit: Some(50),
            ..Default::default()
        };
        assert_eq!(
            filters.to_query(),
            vec![
                ("agency", "Department of Defense".to_string()),
                ("min_value", "1000".to_string()),
                ("defense_only", "false".to_string()),
                ("limit", "50".to_string()),
            ]
        );
    }

    #[test]
    fn summary_params_render_sort_key() {
        let params = SummaryParams { limit: Some(10), sort: Some(SpendingSort::TotalContracts) };
        assert_eq!(
            params.to_query(),
            vec![("limit", "10".to_string()), ("sort", "total_contracts".to_string())]
        );
    }

    #[test]
    fn failed_envelope_has_no_data() {
        let response: ApiResponse<Vec<Contract>> = ApiResponse::failure("boom");
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("boom"));
        assert!(response.into_data().is_none());
    }

    #[test]
    fn envelope_decodes_for_payloads_without_default() {
        let response: ApiResponse<Contract> =
            serde_json::from_value(serde_json::json!({"success": false, "error": "upstream down"})).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.count, None);
        assert_eq!(response.error.as_deref(), Some("upstream down"));
    }

    #[test]
    fn source_url_uses_contract_id() {
        let contract = Contract {
            contract_id: "CONT_AWD_123".to_string(),
            company: "Acme".to_string(),
            agency: "Army".to_string(),
            contract_value: 1.0,
            contract_date: "2024-01-01".to_string(),
            description: String::new(),
            keywords: vec![],
            is_defense_related: true,
        };
        assert_eq!(contract.source_url(), "https://www.usaspending.gov/award/CONT_AWD_123");
    }
}
