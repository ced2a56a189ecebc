//! Call - Backend-owned call request record
//!
//! Pure domain entity without infrastructure dependencies.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Workflow;

/// Call - One call request as reported by the backend
///
/// Never constructed or mutated client-side; every change arrives through a
/// fresh fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Opaque identifier assigned by the backend
    pub id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub workflow: Workflow,
    /// Raw status text (open-ended, see [`crate::domain::CallStatus::classify`])
    pub status: String,
    /// ISO 8601 creation timestamp, used for display only
    pub created_at: String,
}

/// Request body for `POST /calls/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCallRequest {
    pub customer_name: String,
    pub phone_number: String,
    pub workflow: Workflow,
}
