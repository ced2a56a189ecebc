//! Calls API Port
//!
//! Abstract interface for the backend's call collection.

use async_trait::async_trait;

use crate::domain::{errors::ApiError, Call, CreateCallRequest};

/// Service interface for the backend call endpoints
#[async_trait]
pub trait CallsApi: Send + Sync {
    /// Fetch the full call collection, in backend order
    async fn list_calls(&self) -> Result<Vec<Call>, ApiError>;

    /// Request creation of a new call
    async fn create_call(&self, request: &CreateCallRequest) -> Result<Call, ApiError>;
}

