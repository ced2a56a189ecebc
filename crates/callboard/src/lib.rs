//! Callboard Library
//!
//! Core types and synchronization logic for submitting call requests to a
//! call-processing backend and watching their status.
//!
//! # Architecture
//!
//! This crate follows the same layering as a hexagonal application:
//!
//! - **Domain Layer** (`domain/`): Pure types and rules
//!   - `entities/`: Call records and creation requests
//!   - `value_objects/`: Workflow, CallStatus
//!   - `validation`: Client-side input checks
//!   - `errors`: Error taxonomy
//!
//! - **Ports** (`ports/`): The `CallsApi` interface to the backend
//! - **Adapters** (`adapters/`): reqwest implementation of `CallsApi`
//! - **Application** (`application/`): Form, list synchronizer, page container
//! - **Presentation** (`presentation/`): Table model and status styling
//!
//! # Usage
//!
//! ```rust,ignore
//! use callboard::{ApiConfig, CallPage, Credential, HttpCallsApi, ListConfig, DEFAULT_API_URL};
//!
//! let credential = Credential::new(token)?;
//! let api = Arc::new(HttpCallsApi::new(ApiConfig::new(DEFAULT_API_URL, credential)?));
//! let mut page = CallPage::mount(api, ListConfig::default());
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;
pub mod presentation;

// Re-export commonly used types
pub use adapters::{ApiConfig, Credential, HttpCallsApi, DEFAULT_API_URL};
pub use application::{
    CallForm, CallListView, CallPage, ListConfig, ListHandle, ListSnapshot, RefreshSignal,
    ResponseOrdering, DEFAULT_POLL_INTERVAL,
};
pub use domain::{
    validate, ApiError, Call, CallStatus, ConfigError, CreateCallRequest, SubmitError,
    ValidationError, Workflow,
};
pub use ports::CallsApi;
pub use presentation::{ListView, StatusStyle, TableModel, TableRow};
