// src/pipeline.rs
//! Pipeline capability traits: where bills come from and where they go.
//!
//! Each trait describes a single capability, enabling testing each stage in isolation.

use crate::api::CollectionReport;
use crate::error::AppError;
use crate::extraction::AmountExtractor;
use crate::model::BillRecord;
use crate::storage::{SaveOptions, SaveReport};
use crate::types::Credentials;

/// Collects every bill of an account.
#[async_trait::async_trait]
pub trait BillSource {
    async fn collect(&self, credentials: &Credentials) -> Result<CollectionReport, AppError>;
}

/// Persists collected bills.
///
/// Implementations deduplicate by file name, fetch each new PDF, and call
/// `extractor` once per downloaded PDF before storing the bill.
#[async_trait::async_trait]
pub trait BillSink {
    async fn save_bills(
        &self,
        bills: Vec<BillRecord>,
        options: &SaveOptions,
        extractor: &dyn AmountExtractor,
    ) -> Result<SaveReport, AppError>;
}
