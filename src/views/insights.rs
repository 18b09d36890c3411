// src/views/insights.rs
use serde::Serialize;
use std::fmt;

use crate::services::formatting::{format_currency, format_date};
use crate::services::insights::Insights;
use super::NO_DATA;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsView {
    pub title: &'static str,
    pub cards: Vec<InsightCard>,
}

fn contracts_label(count: usize) -> String {
    if count == 1 {
        "1 contract".to_string()
    } else {
        format!("{} contracts", count)
    }
}

impl From<&Insights> for InsightsView {
    fn from(insights: &Insights) -> Self {
        let largest = match &insights.largest_contract {
            Some(contract) => {
                let mut lines = vec![
                    format!("{} → {}", contract.company, contract.agency),
                    format_currency(contract.contract_value),
                ];
                if !contract.description.trim().is_empty() {
                    lines.push(contract.description.trim().to_string());
                }
                lines.push(format!("Date: {}", format_date(&contract.contract_date)));
                lines
            }
            None => vec![NO_DATA.to_string()],
        };

        let partnership = match &insights.top_partnership {
            Some(pair) => vec![
                format!("{} ↔ {}", pair.company, pair.agency),
                format!(
                    "Total Value: {} ({})",
                    format_currency(pair.total_value),
                    contracts_label(pair.contract_count)
                ),
            ],
            None => vec![NO_DATA.to_string()],
        };

        let category = &insights.category;
        let category_lines = if category.contract_count == 0 {
            vec![category.category.clone(), "No matching contracts".to_string()]
        } else {
            let recipients = category
                .top_recipients
                .iter()
                .map(|r| format!("{} ({}%)", r.company, r.share_pct))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                category.category.clone(),
                format!(
                    "Spending: {} ({})",
                    format_currency(category.total_value),
                    contracts_label(category.contract_count)
                ),
                format!("Top Recipients: {}", recipients),
            ]
        };

        InsightsView {
            title: "TRENDING INSIGHTS",
            cards: vec![
                InsightCard { icon: "📈", title: "Biggest Contract", lines: largest },
                InsightCard { icon: "🔥", title: "Most Active Partnership", lines: partnership },
                InsightCard { icon: "🎯", title: "Category Spotlight", lines: category_lines },
            ],
        }
    }
}

impl fmt::Display for InsightsView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for card in &self.cards {
            writeln!(f, "  {} {}", card.icon, card.title)?;
            for line in &card.lines {
                writeln!(f, "     {}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Contract;
    use crate::services::insights::derive_insights;

    #[test]
    fn cards_fall_back_when_empty() {
        let view = InsightsView::from(&derive_insights(&[]));
        assert_eq!(view.cards.len(), 3);
        assert_eq!(view.cards[0].lines, vec![NO_DATA.to_string()]);
        assert_eq!(view.cards[1].lines, vec![NO_DATA.to_string()]);
        assert_eq!(view.cards[2].lines[1], "No matching contracts");
    }

    #[test]
    fn cards_describe_derived_facts() {
        let contracts = vec![
            Contract {
                contract_id: "1".to_string(),
                company: "Google".to_string(),
                agency: "Army".to_string(),
                contract_value: 500_200_000.0,
                contract_date: "2024-02-01".to_string(),
                description: "Cloud Infrastructure".to_string(),
                keywords: vec!["Machine Learning".to_string()],
                is_defense_related: true,
            },
            Contract {
                contract_id: "2".to_string(),
                company: "Microsoft".to_string(),
                agency: "Navy".to_string(),
                contract_value: 1_000_000.0,
                contract_date: "2024-03-01".to_string(),
                description: String::new(),
                keywords: vec![],
                is_defense_related: true,
            },
        ];
        let view = InsightsView::from(&derive_insights(&contracts));
        assert_eq!(
            view.cards[0].lines,
            vec!["Google → Army", "$500.2M", "Cloud Infrastructure", "Date: 2024-02-01"]
        );
        assert_eq!(view.cards[1].lines[1], "Total Value: $500.2M (1 contract)");
        assert_eq!(view.cards[2].lines[2], "Top Recipients: Google (100%)");
    }
}
