// src/services/insights.rs
use serde::Serialize;
use std::collections::HashMap;

use crate::models::Contract;

/// Keyword vocabulary for a spending category. `terms` match case-insensitively as
/// substrings; `tags` must equal a whole keyword, so short tags like "AI" don't hit "aircraft".
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub terms: &'static [&'static str],
    pub tags: &'static [&'static str],
}

pub const AI_ML: Category = Category {
    name: "Artificial Intelligence & Machine Learning",
    terms: &[
        "artificial intelligence",
        "machine learning",
        "deep learning",
        "neural network",
        "computer vision",
        "natural language processing",
        "ai/ml",
    ],
    tags: &["ai", "ml", "ai/ml"],
};

pub const CATEGORY_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Partnership {
    pub company: String,
    pub agency: String,
    pub contract_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub company: String,
    pub total_value: f64,
    /// Rounded percentage of the category total; 0 when the total is 0.
    pub share_pct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub contract_count: usize,
    pub total_value: f64,
    pub top_recipients: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub largest_contract: Option<Contract>,
    pub top_partnership: Option<Partnership>,
    pub category: CategorySpend,
}

/// Contract with the highest value. The first one wins a tie.
pub fn largest_contract(contracts: &[Contract]) -> Option<&Contract> {
    contracts.iter().fold(None, |best: Option<&Contract>, contract| match best {
        Some(b) if b.contract_value >= contract.contract_value => Some(b),
        _ => Some(contract),
    })
}

/// Company/agency pair with the most contracts. Count decides, not value;
/// a tie goes to the pair seen first.
pub fn most_active_partnership(contracts: &[Contract]) -> Option<Partnership> {
    let mut groups: Vec<Partnership> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for contract in contracts {
        let key = (contract.company.as_str(), contract.agency.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Partnership {
                company: contract.company.clone(),
                agency: contract.agency.clone(),
                contract_count: 0,
                total_value: 0.0,
            });
            groups.len() - 1
        });
        groups[slot].contract_count += 1;
        groups[slot].total_value += contract.contract_value;
    }

    groups.into_iter().fold(None, |best: Option<Partnership>, group| match best {
        Some(b) if b.contract_count >= group.contract_count => Some(b),
        _ => Some(group),
    })
}

pub fn matches_category(contract: &Contract, category: &Category) -> bool {
    contract.keywords.iter().any(|keyword| {
        let keyword = keyword.trim().to_lowercase();
        category.tags.iter().any(|tag| keyword == *tag)
            || category.terms.iter().any(|term| keyword.contains(&term.to_lowercase()))
    })
}

/// Total spend on contracts tagged with the category and its top contributing companies.
pub fn category_spend(contracts: &[Contract], category: &Category) -> CategorySpend {
    let mut by_company: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_value = 0.0;
    let mut contract_count = 0;

    for contract in contracts.iter().filter(|c| matches_category(c, category)) {
        contract_count += 1;
        total_value += contract.contract_value;
        let slot = *index.entry(contract.company.as_str()).or_insert_with(|| {
            by_company.push((contract.company.clone(), 0.0));
            by_company.len() - 1
        });
        by_company[slot].1 += contract.contract_value;
    }

    // Stable sort keeps first-seen order among equal totals.
    by_company.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let top_recipients = by_company
        .into_iter()
        .take(CATEGORY_TOP_N)
        .map(|(company, value)| CategoryShare {
            share_pct: share_of(value, total_value),
            company,
            total_value: value,
        })
        .collect();

    CategorySpend {
        category: category.name.to_string(),
        contract_count,
        total_value,
        top_recipients,
    }
}

fn share_of(value: f64, total: f64) -> u32 {
    if total > 0.0 {
        (value / total * 100.0).round() as u32
    } else {
        0
    }
}

pub fn derive_insights(contracts: &[Contract]) -> Insights {
    Insights {
        largest_contract: largest_contract(contracts).cloned(),
        top_partnership: most_active_partnership(contracts),
        category: category_spend(contracts, &AI_ML),
    }
}
