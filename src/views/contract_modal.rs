// src/views/contract_modal.rs
use serde::Serialize;
use std::fmt;

use crate::models::Contract;
use crate::services::formatting::{format_currency_full, format_date, get_amount_color, AmountTier};

pub const SOURCE_LINK_LABEL: &str = "View on USAspending.gov (requires login) →";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractModalView {
    pub contract_id: String,
    pub company: String,
    pub agency: String,
    pub value: String,
    pub value_tier: AmountTier,
    pub date: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub defense_related: bool,
    pub source_url: String,
    pub source_label: &'static str,
}

impl From<&Contract> for ContractModalView {
    fn from(contract: &Contract) -> Self {
        let description = contract.description.trim();
        ContractModalView {
            contract_id: contract.contract_id.clone(),
            company: contract.company.clone(),
            agency: contract.agency.clone(),
            value: format_currency_full(contract.contract_value),
            value_tier: get_amount_color(contract.contract_value),
            date: format_date(&contract.contract_date),
            description: if description.is_empty() { None } else { Some(description.to_string()) },
            keywords: contract.keywords.clone(),
            defense_related: contract.is_defense_related,
            source_url: contract.source_url(),
            source_label: SOURCE_LINK_LABEL,
        }
    }
}

impl fmt::Display for ContractModalView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "CONTRACT DETAILS")?;
        writeln!(f, "  Company:     {}", self.company)?;
        writeln!(f, "  Agency:      {}", self.agency)?;
        writeln!(f, "  Value:       {}", self.value)?;
        writeln!(f, "  Date:        {}", self.date)?;
        if let Some(description) = &self.description {
            writeln!(f, "  Description: {}", description)?;
        }
        if !self.keywords.is_empty() {
            writeln!(f, "  Keywords:    {}", self.keywords.join(", "))?;
        }
        writeln!(f, "  Contract ID: {}", self.contract_id)?;
        if self.defense_related {
            writeln!(f, "  [DEFENSE RELATED]")?;
        }
        writeln!(f, "  {} {}", self.source_label, self.source_url)
    }
}
