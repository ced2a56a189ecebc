//! Domain Errors
//!
//! Error taxonomy for the form, the list view and the API client.

use thiserror::Error;

/// Shown when a creation request fails without a backend-provided detail
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create call. Please try again.";

/// Shown in place of the list when the most recent fetch failed
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load calls";

/// Local, pre-submission input errors. Never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    #[error("Please enter a valid phone number (e.g. +14155550100)")]
    InvalidPhoneNumber,
}

/// Failures talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to connect to backend: {0}")]
    Transport(String),

    #[error("API error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Outcome of a rejected form submission
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to create call: {0}")]
    Request(#[source] ApiError),

    #[error("A submission is already in progress")]
    InFlight,
}

impl SubmitError {
    /// Text shown inline next to the form
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::Request(e) => e
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| CREATE_FAILED_MESSAGE.to_string()),
            SubmitError::InFlight => self.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("No auth token configured. Set CALLBOARD_AUTH_TOKEN or run 'callboard login'.")]
    MissingToken,

    #[error("Invalid API URL '{0}'")]
    InvalidUrl(String),

    #[error("Invalid poll interval '{0}': expected a positive number of milliseconds")]
    InvalidInterval(String),

    #[error("Unknown response ordering '{0}': expected 'issue' or 'arrival'")]
    UnknownOrdering(String),
}
