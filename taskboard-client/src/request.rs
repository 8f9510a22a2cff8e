/// Authenticated-request helper
///
/// Every API call goes through [`AuthenticatedClient::send`]:
///
/// ```text
/// send(url, options)
///   ├─> current session has no access token → MissingToken (nothing sent)
///   ├─> headers = { Content-Type: application/json,
///   │               Authorization: Bearer <token> }
///   │   overlaid with the caller's headers (caller wins per key)
///   ├─> transport.execute(request)
///   ├─> 401 → AuthenticationFailed
///   └─> anything else → raw response
/// ```

use crate::error::{ClientError, ClientResult};
use crate::identity::{IdentityProvider, Session};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Per-request options
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,

    /// Overrides for the default headers
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            headers: HeaderMap::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn patch(body: Value) -> Self {
        Self {
            method: Method::PATCH,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Attaches the session's bearer token to outgoing requests
#[derive(Clone)]
pub struct AuthenticatedClient {
    identity: Arc<dyn IdentityProvider>,
    transport: Arc<dyn HttpTransport>,
}

impl AuthenticatedClient {
    pub fn new(identity: Arc<dyn IdentityProvider>, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            identity,
            transport,
        }
    }

    /// The identity provider this client reads sessions from
    pub fn identity(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity
    }

    /// Returns the current session or fails with `NoSession`
    pub async fn ensure_authenticated(&self) -> ClientResult<Session> {
        self.identity
            .current_session()
            .await?
            .ok_or(ClientError::NoSession)
    }

    /// Default headers for an API call
    ///
    /// # Errors
    ///
    /// `MissingToken` when there is no session or the session has no access
    /// token.
    pub async fn auth_headers(&self) -> ClientResult<HeaderMap> {
        let token = self
            .identity
            .current_session()
            .await?
            .and_then(|session| session.access_token)
            .filter(|token| !token.is_empty())
            .ok_or(ClientError::MissingToken)?;

        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ClientError::Identity(format!("Access token is not a valid header: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    /// Sends an authenticated request
    ///
    /// # Errors
    ///
    /// - `MissingToken` before any network call when no token is available
    /// - `AuthenticationFailed` when the API answers 401
    /// - `Transport` when no response was received
    pub async fn send(&self, url: &str, options: RequestOptions) -> ClientResult<ApiResponse> {
        let mut headers = self.auth_headers().await?;
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        let request = ApiRequest {
            method: options.method,
            url: url.to_string(),
            headers,
            body: options.body,
        };

        tracing::debug!(method = %request.method, url = %request.url, "Sending authenticated request");
        let response = self.transport.execute(request).await?;

        if response.status == StatusCode::UNAUTHORIZED {
            tracing::warn!(url = %url, "API rejected the access token");
            return Err(ClientError::AuthenticationFailed);
        }

        Ok(response)
    }
}
