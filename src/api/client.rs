// src/api/client.rs
//! Pure HTTP client wrapper for the customer portal.
//!
//! This module provides a thin wrapper around reqwest. It keeps cookies
//! across calls, attaches the session header it is given, and retries
//! idempotent GETs on transient failures. It performs no parsing.

use super::{PortalRequest, PortalTransport};
use crate::constants::{RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_MS};
use crate::error::AppError;
use crate::error_recovery::retry_with_backoff;
use reqwest::{header, Client, Method, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for portal requests.
#[derive(Clone)]
pub struct PortalHttpClient {
    client: Client,
    get_attempts: u32,
}

impl PortalHttpClient {
    /// Creates a new HTTP client with a cookie jar and JSON default headers.
    pub fn new(get_attempts: u32) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .cookie_store(true)
            .build()?;
        Ok(Self {
            client,
            get_attempts: get_attempts.max(1),
        })
    }

    /// Creates the default headers for portal requests.
    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Sends one request without any retry.
    async fn send_once(&self, request: &PortalRequest) -> Result<ApiResponse<String>, AppError> {
        log::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone());

        if let Some(authorization) = &request.authorization {
            let value = header::HeaderValue::from_str(authorization).map_err(|e| {
                AppError::MalformedResponse(format!("Invalid session token format: {}", e))
            })?;
            builder = builder.header(header::AUTHORIZATION, value);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        log::debug!("{} {} -> {}", request.method, request.url, response.status());
        extract_response_text(response).await
    }

    fn retry_delays() -> (Duration, Duration) {
        (
            Duration::from_millis(RETRY_INITIAL_DELAY_MS),
            Duration::from_millis(RETRY_MAX_DELAY_MS),
        )
    }
}

#[async_trait::async_trait]
impl PortalTransport for PortalHttpClient {
    async fn send(&self, request: PortalRequest) -> Result<ApiResponse<String>, AppError> {
        if request.method != Method::GET {
            return self.send_once(&request).await;
        }

        let (initial_delay, max_delay) = Self::retry_delays();
        let request = &request;
        retry_with_backoff(
            move || async move {
                let response = self.send_once(request).await?;
                if response.status.is_server_error()
                    || response.status == reqwest::StatusCode::TOO_MANY_REQUESTS
                {
                    return Err(AppError::FetchFailed {
                        url: response.url,
                        status: response.status,
                    });
                }
                Ok(response)
            },
            self.get_attempts,
            initial_delay,
            max_delay,
        )
        .await
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, AppError> {
        let url = &url::Url::parse(url)?;
        let client = &self.client;
        let (initial_delay, max_delay) = Self::retry_delays();

        retry_with_backoff(
            move || async move {
                log::debug!("GET {} (download)", url);
                let response = client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(AppError::FetchFailed {
                        url: url.to_string(),
                        status,
                    });
                }
                Ok(response.bytes().await?.to_vec())
            },
            self.get_attempts,
            initial_delay,
            max_delay,
        )
        .await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
