// src/services/export.rs
use csv::Writer;
use log::info;

use crate::models::Contract;
use crate::BoxError;

pub const CSV_HEADERS: [&str; 9] = [
    "contract_id",
    "company",
    "agency",
    "contract_value",
    "contract_date",
    "description",
    "keywords",
    "is_defense_related",
    "source_url",
];

/// Renders contracts as CSV with a header row. Keywords are joined with `;`.
pub fn contracts_to_csv(contracts: &[Contract]) -> Result<String, BoxError> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS)?;

    for contract in contracts {
        wtr.write_record([
            contract.contract_id.clone(),
            contract.company.clone(),
            contract.agency.clone(),
            contract.contract_value.to_string(),
            contract.contract_date.clone(),
            contract.description.clone(),
            contract.keywords.join(";"),
            contract.is_defense_related.to_string(),
            contract.source_url(),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.to_string())?;
    info!("Exported {} contracts to CSV", contracts.len());
    Ok(String::from_utf8(bytes)?)
}
