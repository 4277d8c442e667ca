// src/api/mock.rs
//! In-memory portal transport for unit tests.

use super::client::ApiResponse;
use super::{PortalRequest, PortalTransport};
use crate::error::AppError;
use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves canned responses keyed by method and URL, and records every request.
#[derive(Default)]
pub struct MockPortal {
    responses: Mutex<HashMap<(Method, String), (StatusCode, String)>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<PortalRequest>>,
}

impl MockPortal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a response for a method and URL.
    pub fn respond(&self, method: Method, url: &str, status: StatusCode, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, url.to_string()), (status, body.into()));
    }

    pub fn serve_file(&self, url: &str, bytes: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(url.to_string(), bytes.to_vec());
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<PortalRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// URLs of the GET requests sent so far, in order.
    pub fn get_urls(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == Method::GET)
            .map(|r| r.url.to_string())
            .collect()
    }
}

#[async_trait::async_trait]
impl PortalTransport for MockPortal {
    async fn send(&self, request: PortalRequest) -> Result<ApiResponse<String>, AppError> {
        let url = request.url.to_string();
        let key = (request.method.clone(), url.clone());
        self.requests.lock().unwrap().push(request);

        let (status, body) = self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, String::new()));

        Ok(ApiResponse {
            data: body,
            status,
            url,
        })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.files
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::FetchFailed {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}
