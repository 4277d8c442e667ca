// src/api/responses.rs
//! Wire shapes of the portal's JSON responses and their conversion into
//! domain types.

use crate::error::AppError;
use crate::model::{DocumentStub, ListingPage};
use crate::types::{DocumentId, Session};
use serde::{Deserialize, Serialize};

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
}

/// One page of `GET /api/customer/invoices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub meta: ListingMeta,
    #[serde(default)]
    pub data: Vec<ListingEntry>,
}

/// Pagination block of a listing page. Both numbers are 1-indexed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListingMeta {
    pub pagenum: u32,
    pub nbpages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingEntry {
    pub id: DocumentId,
    pub formatted_created: String,
    #[serde(default)]
    pub ident: Option<String>,
}

/// Body of `GET /api/customer/invoices/<id>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub link: String,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<Session> for LoginResponse {
    fn to_domain(self) -> Result<Session, AppError> {
        if self.token.is_empty() {
            return Err(AppError::MalformedResponse(
                "Login response carries an empty token".to_string(),
            ));
        }
        Ok(Session::new(self.token_type, self.token))
    }
}

impl ToDomain<DocumentStub> for ListingEntry {
    fn to_domain(self) -> Result<DocumentStub, AppError> {
        Ok(DocumentStub {
            id: self.id,
            created_date_raw: self.formatted_created,
            external_ref: self.ident.unwrap_or_default(),
        })
    }
}

impl ToDomain<ListingPage> for ListingResponse {
    fn to_domain(self) -> Result<ListingPage, AppError> {
        let items = self
            .data
            .into_iter()
            .map(ToDomain::to_domain)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListingPage {
            page_number: self.meta.pagenum,
            total_pages: self.meta.nbpages,
            items,
        })
    }
}

impl ToDomain<String> for DocumentResponse {
    fn to_domain(self) -> Result<String, AppError> {
        let link = self.link.trim();
        if link.is_empty() {
            return Err(AppError::MalformedResponse(
                "Invoice response carries an empty download link".to_string(),
            ));
        }
        Ok(link.to_string())
    }
}
