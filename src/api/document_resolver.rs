// src/api/document_resolver.rs
//! Resolves listing entries to downloadable bills.
//!
//! Lookups within one page are independent and run concurrently, bounded by
//! the configured limit. Output order always matches input order.

use super::{parser, PortalRequest, PortalTransport};
use crate::config::PortalConfig;
use crate::error::AppError;
use crate::model::{BillRecord, DocumentStub};
use crate::types::Session;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};

pub struct DocumentResolver<'a> {
    transport: &'a dyn PortalTransport,
    portal: &'a PortalConfig,
    concurrency: usize,
    import_date: DateTime<Utc>,
}

impl<'a> DocumentResolver<'a> {
    /// Creates a resolver stamping every bill with `import_date`.
    pub fn new(
        transport: &'a dyn PortalTransport,
        portal: &'a PortalConfig,
        concurrency: usize,
        import_date: DateTime<Utc>,
    ) -> Self {
        Self {
            transport,
            portal,
            concurrency: concurrency.max(1),
            import_date,
        }
    }

    /// Looks up one invoice's download link and builds its provisional bill.
    pub async fn resolve(
        &self,
        stub: &DocumentStub,
        session: &Session,
    ) -> Result<BillRecord, AppError> {
        let url = self.portal.document_url(&stub.id)?;
        let response = self
            .transport
            .send(PortalRequest::authorized_get(url, session))
            .await?;
        let file_url = parser::parse_document_response(response)?;
        let date = stub.created_date()?;

        let bill = BillRecord::provisional(
            &self.portal.vendor,
            date,
            file_url,
            stub.stable_token(),
            self.import_date,
        );
        log::debug!("Resolved invoice {} to {}", stub.id, bill.file_name());
        Ok(bill)
    }

    /// Resolves every entry of a page, preserving order.
    ///
    /// The first failure aborts the page.
    pub async fn resolve_page(
        &self,
        stubs: &[DocumentStub],
        session: &Session,
    ) -> Result<Vec<BillRecord>, AppError> {
        // Futures are lazy; `buffered` still bounds how many run at once.
        let lookups: Vec<_> = stubs
            .iter()
            .map(|stub| self.resolve(stub, session))
            .collect();

        stream::iter(lookups)
            .buffered(self.concurrency)
            .try_collect()
            .await
    }
}
