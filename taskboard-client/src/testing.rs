//! In-memory test doubles

use crate::error::ClientResult;
use crate::identity::{Principal, Session};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Mutex;

type Handler = Box<dyn Fn(&ApiRequest) -> ApiResponse + Send + Sync>;

/// Transport that answers from a closure and records every request
pub struct MockTransport {
    handler: Handler,
    requests: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&ApiRequest) -> ApiResponse + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with the same status and body
    pub fn always(status: u16, body: Value) -> Self {
        Self::new(move |_| json_response(status, body.clone()))
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let response = (self.handler)(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

pub fn json_response(status: u16, body: Value) -> ApiResponse {
    ApiResponse {
        status: StatusCode::from_u16(status).unwrap(),
        body: Bytes::from(body.to_string()),
    }
}

pub fn session(subject_id: &str, username: &str, token: Option<&str>) -> Session {
    Session {
        access_token: token.map(str::to_string),
        principal: Principal {
            username: username.to_string(),
            subject_id: subject_id.to_string(),
            email: format!("{}@example.com", username),
        },
    }
}

pub fn user_json(user_id: i32, subject_id: &str, username: &str) -> Value {
    serde_json::json!({
        "userId": user_id,
        "subjectId": subject_id,
        "username": username,
        "email": format!("{}@example.com", username),
        "profilePictureUrl": "i1.jpg",
        "teamId": 1,
        "createdAt": "2024-01-01T00:00:00Z"
    })
}
