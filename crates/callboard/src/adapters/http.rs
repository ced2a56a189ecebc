//! HTTP Calls API Client
//!
//! reqwest implementation of [`CallsApi`] against the backend REST endpoints.

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::domain::{ApiError, Call, ConfigError, CreateCallRequest};
use crate::ports::CallsApi;

/// Backend base URL used when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Bearer credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting blank values
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ConfigError::MissingToken);
        }
        Ok(Self(token))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Connection settings for the backend
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
    credential: Credential,
}

impl ApiConfig {
    /// Create a config, checking the URL and trimming trailing slashes
    pub fn new(base_url: &str, credential: Credential) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            base_url: trimmed.to_string(),
            credential,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// Error body returned by the backend on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// API Client for the call backend
#[derive(Debug, Clone)]
pub struct HttpCallsApi {
    client: Client,
    config: ApiConfig,
}

impl HttpCallsApi {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn calls_url(&self) -> String {
        format!("{}/calls/", self.config.base_url)
    }

    /// Turn a non-success response into [`ApiError::Status`], keeping a
    /// string `detail` field from a JSON body when present.
    async fn error_from(resp: Response) -> ApiError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|d| d.as_str().map(str::to_string))
            .filter(|d| !d.is_empty());

        tracing::warn!(status, detail = ?detail, "Backend returned an error");
        ApiError::Status { status, detail }
    }
}

#[async_trait]
impl CallsApi for HttpCallsApi {
    async fn list_calls(&self) -> Result<Vec<Call>, ApiError> {
        let url = self.calls_url();
        tracing::debug!(%url, "Fetching calls");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(self.config.credential.expose())
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let calls: Vec<Call> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::debug!(count = calls.len(), "Fetched calls");
        Ok(calls)
    }

    async fn create_call(&self, request: &CreateCallRequest) -> Result<Call, ApiError> {
        let url = self.calls_url();
        tracing::debug!(%url, workflow = %request.workflow, "Creating call");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(self.config.credential.expose())
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }

        let call: Call = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        tracing::info!(id = %call.id, status = %call.status, "Created call");
        Ok(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Workflow;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HttpCallsApi {
        let config = ApiConfig::new(
            &format!("{}/api/", server.uri()),
            Credential::new("test-token").unwrap(),
        )
        .unwrap();
        HttpCallsApi::new(config)
    }

    fn call_json(id: &str, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "customer_name": "Ada Lovelace",
            "phone_number": "+14155550100",
            "workflow": "Support",
            "status": status,
            "created_at": "2024-05-01T09:30:00"
        })
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        assert_eq!(format!("{:?}", credential), "Credential(***)");
        assert_eq!(credential.expose(), "super-secret");
    }

    #[test]
    fn test_blank_credential_rejected() {
        assert_eq!(Credential::new("   "), Err(ConfigError::MissingToken));
    }

    #[test]
    fn test_config_trims_trailing_slash() {
        let config = ApiConfig::new("http://localhost:8000/api//", Credential::new("t").unwrap())
            .unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_config_rejects_bad_url() {
        let err = ApiConfig::new("not a url", Credential::new("t").unwrap()).unwrap_err();
        assert_eq!(err, ConfigError::InvalidUrl("not a url".to_string()));
    }

    #[tokio::test]
    async fn test_list_calls_sends_bearer_and_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calls/"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                call_json("b", "pending"),
                call_json("a", "completed"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let calls = client_for(&server).list_calls().await.unwrap();
        let ids: Vec<_> = calls.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_create_call_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/calls/"))
            .and(header("authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({
                "customer_name": "Ada Lovelace",
                "phone_number": "+14155550100",
                "workflow": "Sales"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(call_json("new", "pending")))
            .expect(1)
            .mount(&server)
            .await;

        let request = CreateCallRequest {
            customer_name: "Ada Lovelace".to_string(),
            phone_number: "+14155550100".to_string(),
            workflow: Workflow::Sales,
        };
        let call = client_for(&server).create_call(&request).await.unwrap();
        assert_eq!(call.id, "new");
    }

    #[tokio::test]
    async fn test_error_detail_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/calls/"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "detail": "Phone number already has a pending call"
            })))
            .mount(&server)
            .await;

        let request = CreateCallRequest {
            customer_name: "Ada".to_string(),
            phone_number: "+14155550100".to_string(),
            workflow: Workflow::Support,
        };
        let err = client_for(&server).create_call(&request).await.unwrap_err();
        assert_eq!(err.detail(), Some("Phone number already has a pending call"));
        assert!(matches!(err, ApiError::Status { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_error_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calls/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_calls().await.unwrap_err();
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_non_string_detail_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/calls/"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "detail": [{"loc": ["body", "workflow"], "msg": "value is not a valid enumeration member"}]
            })))
            .mount(&server)
            .await;

        let request = CreateCallRequest {
            customer_name: "Ada".to_string(),
            phone_number: "+14155550100".to_string(),
            workflow: Workflow::Support,
        };
        let err = client_for(&server).create_call(&request).await.unwrap_err();
        assert_eq!(err.detail(), None);
    }

    #[tokio::test]
    async fn test_malformed_list_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/calls/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).list_calls().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
