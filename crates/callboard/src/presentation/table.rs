//! Call history table model

use chrono::{DateTime, Local, NaiveDateTime};

use crate::domain::errors::FETCH_FAILED_MESSAGE;
use crate::domain::Call;
use crate::presentation::StatusStyle;

/// Column headers, in display order
pub const COLUMNS: [&str; 5] = ["Customer", "Phone", "Workflow", "Status", "Time"];

/// Shown while no data has ever been received
pub const LOADING_MESSAGE: &str = "Loading call history...";

/// Single body row for an empty collection
pub const EMPTY_MESSAGE: &str = "No calls recorded yet";

/// One rendered call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRow {
    pub id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub workflow: String,
    /// Raw status text, shown as-is even when unrecognized
    pub status: String,
    pub status_style: Option<StatusStyle>,
    pub time: String,
}

impl CallRow {
    pub fn from_call(call: &Call) -> Self {
        Self {
            id: call.id.clone(),
            customer_name: call.customer_name.clone(),
            phone_number: call.phone_number.clone(),
            workflow: call.workflow.to_string(),
            status: call.status.clone(),
            status_style: StatusStyle::for_status(&call.status),
            time: format_time(&call.created_at),
        }
    }

    /// Cell texts in [`COLUMNS`] order
    pub fn cells(&self) -> [&str; 5] {
        [
            self.customer_name.as_str(),
            self.phone_number.as_str(),
            self.workflow.as_str(),
            self.status.as_str(),
            self.time.as_str(),
        ]
    }
}

/// A table body row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Call(CallRow),
    Placeholder { text: &'static str, colspan: usize },
}

/// Table body in backend order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    pub rows: Vec<TableRow>,
}

impl TableModel {
    pub fn from_calls(calls: &[Call]) -> Self {
        if calls.is_empty() {
            return Self {
                rows: vec![TableRow::Placeholder {
                    text: EMPTY_MESSAGE,
                    colspan: COLUMNS.len(),
                }],
            };
        }

        Self {
            rows: calls.iter().map(|c| TableRow::Call(CallRow::from_call(c))).collect(),
        }
    }
}

/// What the list panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Loading,
    Error,
    Table(TableModel),
}

impl ListView {
    /// A failed latest fetch wins over stale data; no data means loading.
    pub fn resolve(calls: Option<&[Call]>, failed: bool) -> Self {
        if failed {
            return ListView::Error;
        }
        match calls {
            None => ListView::Loading,
            Some(calls) => ListView::Table(TableModel::from_calls(calls)),
        }
    }

    /// Placeholder text for the non-table states
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListView::Loading => Some(LOADING_MESSAGE),
            ListView::Error => Some(FETCH_FAILED_MESSAGE),
            ListView::Table(_) => None,
        }
    }
}

/// Format a creation timestamp as local `HH:MM`, dropping the date.
///
/// Offset timestamps are converted to local time. Naive timestamps are taken
/// as local wall-clock time. Anything unparseable is returned unchanged.
pub fn format_time(created_at: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_at) {
        return dt.with_timezone(&Local).format("%H:%M").to_string();
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(created_at, pattern) {
            return naive.format("%H:%M").to_string();
        }
    }

    tracing::debug!(created_at, "Unparseable call timestamp");
    created_at.to_string()
}
