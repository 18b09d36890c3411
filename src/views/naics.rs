// src/views/naics.rs
use serde::Serialize;
use std::fmt;

use crate::models::{NaicsCode, NaicsRecipient};
use crate::services::formatting::{format_currency, format_date, group_thousands};
use super::NO_DATA;

pub const NAICS_TITLE: &str = "NAICS INDUSTRY TRACKING";
pub const NAICS_INTRO: &str = "Track defense spending by North American Industry Classification System (NAICS) codes.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaicsRow {
    pub code: String,
    pub description: String,
    pub total_recipients: String,
    pub total_spending: String,
    pub avg_per_recipient: String,
}

impl From<&NaicsCode> for NaicsRow {
    fn from(naics: &NaicsCode) -> Self {
        NaicsRow {
            code: naics.code.clone(),
            description: naics.description.clone(),
            total_recipients: group_thousands(naics.total_recipients),
            total_spending: format_currency(naics.total_spending),
            avg_per_recipient: format_currency(naics.avg_spending_per_recipient),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaicsPageView {
    pub title: &'static str,
    pub intro: &'static str,
    pub rows: Vec<NaicsRow>,
}

impl NaicsPageView {
    pub fn new(codes: &[NaicsCode]) -> Self {
        NaicsPageView {
            title: NAICS_TITLE,
            intro: NAICS_INTRO,
            rows: codes.iter().map(NaicsRow::from).collect(),
        }
    }
}

impl fmt::Display for NaicsPageView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.intro)?;
        writeln!(f)?;
        if self.rows.is_empty() {
            return writeln!(f, "  {}", NO_DATA);
        }
        for row in &self.rows {
            writeln!(f, "  [{}] {}", row.code, row.description)?;
            writeln!(
                f,
                "         Recipients: {} | Total Spending: {} | Avg per Recipient: {}",
                row.total_recipients, row.total_spending, row.avg_per_recipient
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipientRow {
    pub rank: String,
    pub name: String,
    pub uei: String,
    pub amount: String,
}

impl From<&NaicsRecipient> for RecipientRow {
    fn from(recipient: &NaicsRecipient) -> Self {
        RecipientRow {
            rank: format!("#{}", recipient.rank),
            name: recipient.recipient_name.clone(),
            uei: recipient.recipient_uei.clone().unwrap_or_else(|| "N/A".to_string()),
            amount: format_currency(recipient.amount),
        }
    }
}

/// Header of the recipients modal plus the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NaicsRecipientsView {
    pub code: String,
    pub description: String,
    pub total_spending: String,
    pub total_recipients: String,
    pub data_period: String,
    pub heading: String,
    pub subheading: String,
    pub rows: Vec<RecipientRow>,
}

impl NaicsRecipientsView {
    pub fn new(naics: &NaicsCode, recipients: &[NaicsRecipient]) -> Self {
        NaicsRecipientsView {
            code: naics.code.clone(),
            description: naics.description.clone(),
            total_spending: format_currency(naics.total_spending),
            total_recipients: group_thousands(naics.total_recipients),
            data_period: format!("{} to {}", format_date(&naics.earliest_data), format_date(&naics.latest_data)),
            heading: format!("TOP {} CONTRACTORS", recipients.len()),
            subheading: format!("Ranked by total contract value for NAICS {}", naics.code),
            rows: recipients.iter().map(RecipientRow::from).collect(),
        }
    }
}

impl fmt::Display for NaicsRecipientsView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "NAICS {} - {}", self.code, self.description)?;
        writeln!(f, "  Total Spending: {} | Recipients: {}", self.total_spending, self.total_recipients)?;
        writeln!(f, "  Data Period: {}", self.data_period)?;
        writeln!(f)?;
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", self.subheading)?;
        writeln!(f, "  {:<6} {:<40} {:<14} {:>10}", "RANK", "COMPANY", "UEI", "AMOUNT")?;
        for row in &self.rows {
            writeln!(f, "  {:<6} {:<40} {:<14} {:>10}", row.rank, row.name, row.uei, row.amount)?;
        }
        Ok(())
    }
}
