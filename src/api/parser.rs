// src/api/parser.rs
//! Turns raw portal responses into domain values.
//!
//! Status checks happen here: a non-success status never reaches the JSON
//! decoder.

use super::client::ApiResponse;
use super::responses::{DocumentResponse, ListingResponse, LoginResponse, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::AppError;
use crate::model::ListingPage;
use crate::types::Session;
use reqwest::StatusCode;

/// Parse any successful portal response, failing with `FetchFailed` otherwise.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        log::error!(
            "Portal returned {} for {}: {}",
            result.status,
            result.url,
            preview(&result.data)
        );
        return Err(AppError::FetchFailed {
            url: result.url,
            status: result.status,
        });
    }
    parse_body(&result.data, &result.url)
}

fn parse_body<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse the login response. Anything but HTTP 200 is an authentication failure.
pub fn parse_login_response(result: ApiResponse<String>) -> Result<Session, AppError> {
    if result.status != StatusCode::OK {
        return Err(AppError::AuthenticationFailed {
            status: result.status,
        });
    }
    let login: LoginResponse = parse_body(&result.data, &result.url)?;
    login.to_domain()
}

/// Parse one listing page.
pub fn parse_listing_response(result: ApiResponse<String>) -> Result<ListingPage, AppError> {
    let listing: ListingResponse = parse_api_response(result)?;
    listing.to_domain()
}

/// Parse a per-invoice response into its download link.
pub fn parse_document_response(result: ApiResponse<String>) -> Result<String, AppError> {
    let document: DocumentResponse = parse_api_response(result)?;
    document.to_domain()
}
