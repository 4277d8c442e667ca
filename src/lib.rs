// src/lib.rs
//! telecoop-bills library: collects TeleCoop invoices as normalized bill records.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `PipelineConfig`, `PortalConfig`
//! - **Domain model**: `BillRecord`, `ListingPage`, `DocumentStub`
//! - **Portal client**: `PortalTransport`, `PortalHttpClient`, `BillCollector`
//! - **Amounts**: `AmountExtractor`, `NetTotalExtractor`
//! - **Storage**: `BillSink`, `DirectoryStore`

mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod extraction;
mod model;
mod pipeline;
mod storage;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    default_concurrency, CommandLineInput, PipelineConfig, PortalConfig, TextExtraction,
};
pub use crate::constants::{NET_TOTAL_MARKER, PLACEHOLDER_CURRENCY, VENDOR};

// --- Domain Model ---
pub use crate::model::{
    bill_file_name, parse_listing_date, BillMetadata, BillRecord, DocumentStub, ListingPage,
};

// --- Domain Types ---
pub use crate::types::{Credentials, DocumentId, Email, Password, Session, ValidatedUrl};

// --- Portal Client ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_document_response, parse_listing_response, parse_login_response},
    Authenticator, BillCollector, CollectionReport, DocumentResolver, PageFetcher,
    PortalHttpClient, PortalRequest, PortalTransport,
};

// --- Amount Extraction ---
pub use crate::extraction::{find_amount_after_marker, AmountExtractor, NetTotal, NetTotalExtractor};

// --- Storage ---
pub use crate::storage::{
    DirectoryStore, FailedSave, Manifest, PdfExtractText, PdfTextSource, PdftotextCommand,
    SaveOptions, SaveReport,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{BillSink, BillSource};
