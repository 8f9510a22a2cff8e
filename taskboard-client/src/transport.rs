/// HTTP transport seam
///
/// [`AuthenticatedClient`](crate::request::AuthenticatedClient) builds fully
/// formed [`ApiRequest`]s and hands them to an [`HttpTransport`]. Production
/// code uses [`ReqwestTransport`]; tests substitute an in-memory transport
/// that records every call.

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Outgoing request, headers already merged
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// Raw response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl ApiResponse {
    /// Decodes the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(ClientError::from)
    }

    /// Decodes a 2xx body, turning anything else into `ClientError::Server`
    pub fn into_json<T: DeserializeOwned>(self) -> ClientResult<T> {
        if self.status.is_success() {
            self.json()
        } else {
            Err(ClientError::from_response(&self))
        }
    }
}

/// Sends requests over the network
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes one request
    ///
    /// Only failures to obtain a response are errors; every status code is
    /// returned as a response.
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a 30 second request timeout
    pub fn new() -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(method = %request.method, url = %request.url, status = status.as_u16(), "API response");

        Ok(ApiResponse { status, body })
    }
}
