// src/views/search_bar.rs
use serde::{Deserialize, Serialize};

use crate::models::{Contract, SearchFilters};

pub const PLACEHOLDER: &str = "Search contractors, recipients, contracts...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    Contractor,
    Recipient,
    Agency,
    Contract,
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contractor" => Ok(SearchScope::Contractor),
            "recipient" => Ok(SearchScope::Recipient),
            "agency" => Ok(SearchScope::Agency),
            "contract" => Ok(SearchScope::Contract),
            other => Err(format!("unknown search scope: {}", other)),
        }
    }
}

/// A submitted search. Blank text constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub scope: SearchScope,
}

impl SearchQuery {
    pub fn new(text: &str, scope: SearchScope) -> Self {
        SearchQuery { text: text.to_string(), scope }
    }

    fn term(&self) -> Option<&str> {
        let term = self.text.trim();
        if term.is_empty() {
            None
        } else {
            Some(term)
        }
    }

    /// Server-side part of the search, layered over `base`.
    pub fn to_filters(&self, base: SearchFilters) -> SearchFilters {
        let term = match self.term() {
            Some(term) => term.to_string(),
            None => return base,
        };
        match self.scope {
            SearchScope::Contractor | SearchScope::Recipient => SearchFilters { company: Some(term), ..base },
            SearchScope::Agency => SearchFilters { agency: Some(term), ..base },
            SearchScope::Contract => base,
        }
    }

    /// Client-side part: contract scope matches id or description, case-insensitively.
    pub fn matches(&self, contract: &Contract) -> bool {
        match (self.scope, self.term()) {
            (SearchScope::Contract, Some(term)) => {
                let term = term.to_lowercase();
                contract.contract_id.to_lowercase().contains(&term)
                    || contract.description.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}
