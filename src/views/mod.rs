// src/views/mod.rs
//
// View models for the dashboard pages. Each one serializes to JSON for the
// HTTP routes and implements `Display` for the terminal renderers.
use serde::Serialize;
use std::fmt;

pub mod bar_chart;
pub mod contract_modal;
pub mod contract_table;
pub mod dashboard;
pub mod header_stats;
pub mod insights;
pub mod naics;
pub mod search_bar;

pub const NO_DATA: &str = "No data available";
pub const DATA_SOURCES: &str = "Data Sources: USAspending.gov | SAM.gov";

/// What a page shows: a spinner, a page-level error, an empty notice or the content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageState<T> {
    Loading { message: String },
    Error { message: String },
    Empty { message: String },
    Ready { view: T },
}

impl<T> PageState<T> {
    pub fn loading(message: impl Into<String>) -> Self {
        PageState::Loading { message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        PageState::Error { message: message.into() }
    }

    pub fn empty() -> Self {
        PageState::Empty { message: NO_DATA.to_string() }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            PageState::Loading { message } => PageState::Loading { message },
            PageState::Error { message } => PageState::Error { message },
            PageState::Empty { message } => PageState::Empty { message },
            PageState::Ready { view } => PageState::Ready { view: f(view) },
        }
    }

    pub fn view(&self) -> Option<&T> {
        match self {
            PageState::Ready { view } => Some(view),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for PageState<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PageState::Loading { message } => writeln!(f, "{}", message),
            PageState::Error { message } => {
                writeln!(f, "{}", message)?;
                writeln!(f, "[RETRY] reload the page to try again")
            }
            PageState::Empty { message } => writeln!(f, "{}", message),
            PageState::Ready { view } => write!(f, "{}", view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_state_serializes_with_tag() {
        let state: PageState<u32> = PageState::error("Failed to load");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], "Failed to load");

        let ready = PageState::Ready { view: 7u32 };
        let json = serde_json::to_value(&ready).unwrap();
        assert_eq!(json["state"], "ready");
        assert_eq!(json["view"], 7);
        assert_eq!(ready.view(), Some(&7));
    }

    #[test]
    fn error_state_offers_retry() {
        let state: PageState<String> = PageState::error("boom");
        let text = state.to_string();
        assert!(text.contains("boom"));
        assert!(text.contains("RETRY"));
        assert!(!state.is_ready());
    }
}
