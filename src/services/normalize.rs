// src/services/normalize.rs
//
// Decode boundary for every endpoint. Backend payloads drift between versions
// (`company` vs `name`, `total_value` vs `total_contract_value`, numbers sent as
// strings), so each local field lists the backend keys it accepts in precedence
// order. The first key that is present, non-null and coercible wins; otherwise
// numbers default to 0 and strings to "".
use serde_json::Value;
use log::debug;

use crate::models::{AgencySpending, Company, CompanyDetails, Contract, NaicsCode, NaicsRecipient, QuarterlyData, Stats};
use crate::BoxError;

pub mod keys {
    pub const SUMMARY_NAME: &[&str] = &["company", "name"];
    pub const SUMMARY_TOTAL_CONTRACTS: &[&str] = &["total_contracts"];
    pub const SUMMARY_TOTAL_VALUE: &[&str] = &["total_value", "total_contract_value"];
    pub const SUMMARY_AVG_VALUE: &[&str] = &["avg_value", "avg_contract_value"];
    pub const SUMMARY_LATEST_DATE: &[&str] = &["latest_date", "latest_contract_date"];
    pub const SUMMARY_NUM_AGENCIES: &[&str] = &["num_agencies"];
    pub const SUMMARY_FEDERAL_PCT: &[&str] = &["federal_percentage"];

    pub const AGENCY_NAME: &[&str] = &["agency", "name"];
    pub const AGENCY_TOTAL_CONTRACTS: &[&str] = &["total_contracts"];
    pub const AGENCY_TOTAL_VALUE: &[&str] = &["total_value", "total_contract_value"];
    pub const AGENCY_AVG_VALUE: &[&str] = &["avg_value", "avg_contract_value"];
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn first_present<T>(item: &Value, keys: &[&str], coerce: fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find_map(coerce)
}

pub fn number_field(item: &Value, keys: &[&str]) -> f64 {
    first_present(item, keys, coerce_number).unwrap_or(0.0)
}

/// Monetary fields never go below zero.
pub fn amount_field(item: &Value, keys: &[&str]) -> f64 {
    number_field(item, keys).max(0.0)
}

pub fn count_field(item: &Value, keys: &[&str]) -> u64 {
    let n = number_field(item, keys);
    if n > 0.0 {
        n.round() as u64
    } else {
        0
    }
}

pub fn string_field(item: &Value, keys: &[&str]) -> String {
    first_present(item, keys, coerce_string).unwrap_or_default()
}

fn bool_field(item: &Value, keys: &[&str]) -> bool {
    first_present(item, keys, coerce_bool).unwrap_or(false)
}

fn string_list_field(item: &Value, key: &str) -> Vec<String> {
    match item.get(key) {
        Some(Value::Array(values)) => values.iter().filter_map(coerce_string).collect(),
        _ => Vec::new(),
    }
}

/// Rows of a `{count, data}` style payload. A missing `data` is an empty list;
/// a payload that is not a JSON object is a shape error.
pub fn payload_rows(json: &Value) -> Result<&[Value], BoxError> {
    if !json.is_object() {
        return Err(format!("unexpected payload shape: expected an object, got {}", type_name(json)).into());
    }
    match json.get("data") {
        Some(Value::Array(rows)) => Ok(rows.as_slice()),
        Some(Value::Null) | None => Ok(&[][..]),
        Some(other) => Err(format!("unexpected `data` field: expected an array, got {}", type_name(other)).into()),
    }
}

pub fn payload_count(json: &Value) -> Option<u64> {
    json.get("count").and_then(coerce_number).filter(|n| *n >= 0.0).map(|n| n as u64)
}

/// NAICS endpoints report success through a `status` marker instead of a boolean `success`.
pub fn naics_status_is_success(json: &Value) -> bool {
    json.get("status").and_then(Value::as_str) == Some("success")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `/api/stats` either answers `{success, data}` or the bare stats object.
pub fn stats_from_payload(json: &Value) -> Result<Stats, BoxError> {
    let enveloped = json.get("success").and_then(Value::as_bool) == Some(true)
        && json.get("data").map(Value::is_object).unwrap_or(false);

    let data = if enveloped {
        &json["data"]
    } else {
        debug!("Stats payload is not enveloped, treating it as bare data");
        json
    };

    if !data.is_object() {
        return Err(format!("unexpected stats payload: expected an object, got {}", type_name(data)).into());
    }

    let quarterly_trend = match data.get("quarterly_trend") {
        Some(Value::Array(quarters)) => quarters
            .iter()
            .map(|q| QuarterlyData {
                quarter: string_field(q, &["quarter"]),
                spending: amount_field(q, &["spending"]),
                contracts: count_field(q, &["contracts"]),
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Stats {
        total_spending_usd: amount_field(data, &["total_spending_usd"]),
        total_defense_contracts: count_field(data, &["total_defense_contracts"]),
        num_companies: count_field(data, &["num_companies"]),
        num_agencies: count_field(data, &["num_agencies"]),
        avg_contract_value_usd: amount_field(data, &["avg_contract_value_usd"]),
        quarterly_trend,
    })
}

pub fn company_from_value(item: &Value) -> Company {
    Company {
        name: string_field(item, keys::SUMMARY_NAME),
        total_contracts: count_field(item, keys::SUMMARY_TOTAL_CONTRACTS),
        total_contract_value: amount_field(item, keys::SUMMARY_TOTAL_VALUE),
        avg_contract_value: amount_field(item, keys::SUMMARY_AVG_VALUE),
        latest_contract_date: string_field(item, keys::SUMMARY_LATEST_DATE),
        num_agencies: count_field(item, keys::SUMMARY_NUM_AGENCIES),
        federal_percentage: number_field(item, keys::SUMMARY_FEDERAL_PCT).clamp(0.0, 100.0),
    }
}

/// Lenient read of a passed-through company profile, for display only.
pub fn company_details_from_value(item: &Value) -> CompanyDetails {
    let contracts = match item.get("contracts") {
        Some(Value::Array(rows)) => rows.iter().map(contract_from_value).collect(),
        _ => Vec::new(),
    };
    CompanyDetails { company: company_from_value(item), contracts }
}

pub fn agency_from_value(item: &Value) -> AgencySpending {
    AgencySpending {
        agency: string_field(item, keys::AGENCY_NAME),
        total_contracts: count_field(item, keys::AGENCY_TOTAL_CONTRACTS),
        total_value: amount_field(item, keys::AGENCY_TOTAL_VALUE),
        avg_value: amount_field(item, keys::AGENCY_AVG_VALUE),
    }
}

pub fn contract_from_value(item: &Value) -> Contract {
    Contract {
        contract_id: string_field(item, &["contract_id"]),
        company: string_field(item, &["company"]),
        agency: string_field(item, &["agency"]),
        contract_value: amount_field(item, &["contract_value"]),
        contract_date: string_field(item, &["contract_date"]),
        description: string_field(item, &["description"]),
        keywords: string_list_field(item, "keywords"),
        is_defense_related: bool_field(item, &["is_defense_related"]),
    }
}

pub fn naics_code_from_value(item: &Value) -> NaicsCode {
    NaicsCode {
        code: string_field(item, &["code"]),
        description: string_field(item, &["description"]),
        total_recipients: count_field(item, &["total_recipients"]),
        total_spending: amount_field(item, &["total_spending"]),
        avg_spending_per_recipient: amount_field(item, &["avg_spending_per_recipient"]),
        max_recipient_amount: amount_field(item, &["max_recipient_amount"]),
        earliest_data: string_field(item, &["earliest_data"]),
        latest_data: string_field(item, &["latest_data"]),
    }
}

pub fn naics_recipient_from_value(item: &Value) -> NaicsRecipient {
    let uei = string_field(item, &["recipient_uei"]);
    NaicsRecipient {
        naics_code: string_field(item, &["naics_code"]),
        naics_description: string_field(item, &["naics_description"]),
        recipient_name: string_field(item, &["recipient_name"]),
        recipient_uei: if uei.trim().is_empty() { None } else { Some(uei) },
        amount: amount_field(item, &["amount"]),
        rank: u32::try_from(count_field(item, &["rank"])).unwrap_or(u32::MAX),
        time_period_start: string_field(item, &["time_period_start"]),
        time_period_end: string_field(item, &["time_period_end"]),
    }
}

pub fn rows_from_payload<T>(json: &Value, decode: fn(&Value) -> T) -> Result<Vec<T>, BoxError> {
    Ok(payload_rows(json)?.iter().map(decode).collect())
}
