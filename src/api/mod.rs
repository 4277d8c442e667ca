// src/api/mod.rs
//! Customer-portal interaction: log in, walk the invoice listing, resolve
//! download links.
//!
//! HTTP details live behind [`PortalTransport`]. The components in this
//! module only build requests and interpret responses, so they can be driven
//! by an in-memory transport in tests.

pub mod authenticator;
pub mod client;
pub mod collector;
pub mod document_resolver;
pub mod page_fetcher;
pub mod parser;
mod responses;
mod simple_pagination;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::AppError;
use crate::types::Session;
use client::ApiResponse;
use reqwest::Method;
use url::Url;

/// One HTTP exchange with the portal: method, URL, headers and JSON body.
#[derive(Debug, Clone)]
pub struct PortalRequest {
    pub method: Method,
    pub url: Url,
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl PortalRequest {
    /// Unauthenticated JSON POST.
    pub fn post_json(url: Url, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            url,
            authorization: None,
            body: Some(body),
        }
    }

    /// GET carrying the session's `Authorization` header.
    pub fn authorized_get(url: Url, session: &Session) -> Self {
        Self {
            method: Method::GET,
            url,
            authorization: Some(session.authorization_header()),
            body: None,
        }
    }
}

/// The ability to exchange requests with the portal.
///
/// Implementations own connection pooling, cookies, TLS and retries. The
/// collection pipeline depends on this trait, never on reqwest directly.
#[async_trait::async_trait]
pub trait PortalTransport: Send + Sync {
    /// Sends a request and returns the raw body with its status, whatever
    /// the status is.
    async fn send(&self, request: PortalRequest) -> Result<ApiResponse<String>, AppError>;

    /// Downloads a file. Non-success statuses are errors.
    async fn download(&self, url: &str) -> Result<Vec<u8>, AppError>;
}

// Re-export the public interface
pub use authenticator::Authenticator;
pub use client::PortalHttpClient;
pub use collector::{BillCollector, CollectionReport};
pub use document_resolver::DocumentResolver;
pub use page_fetcher::PageFetcher;
