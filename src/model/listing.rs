// src/model/listing.rs
//! Snapshot of the portal's paged invoice listing.

use crate::constants::LISTING_DATE_FORMAT;
use crate::error::AppError;
use crate::types::DocumentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One page of the invoice listing.
///
/// `page_number` and `total_pages` are 1-indexed as reported by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingPage {
    pub page_number: u32,
    pub total_pages: u32,
    pub items: Vec<DocumentStub>,
}

impl ListingPage {
    /// Whether the portal reported pages after this one.
    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// A listing entry, before its download link has been resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStub {
    pub id: DocumentId,
    /// Creation date as sent by the portal, `DD/MM/YYYY`.
    pub created_date_raw: String,
    /// The vendor's own invoice reference (`ident`).
    pub external_ref: String,
}

impl DocumentStub {
    /// Parses the creation date as a UTC calendar date.
    ///
    /// Never falls back to the current date: an unreadable date fails the run.
    pub fn created_date(&self) -> Result<NaiveDate, AppError> {
        parse_listing_date(&self.created_date_raw)
    }

    /// Token that identifies this invoice across runs.
    ///
    /// The vendor reference is preferred; the portal id stands in when the
    /// portal sends an empty reference.
    pub fn stable_token(&self) -> &str {
        let external_ref = self.external_ref.trim();
        if external_ref.is_empty() {
            self.id.as_str()
        } else {
            external_ref
        }
    }
}

/// Parses a `DD/MM/YYYY` listing date.
pub fn parse_listing_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), LISTING_DATE_FORMAT).map_err(|source| {
        AppError::DateParse {
            raw: raw.to_string(),
            source,
        }
    })
}
