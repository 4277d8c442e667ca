// src/api/page_fetcher.rs
//! Retrieves one page of the invoice listing.

use super::{parser, PortalRequest, PortalTransport};
use crate::config::PortalConfig;
use crate::error::AppError;
use crate::model::ListingPage;
use crate::types::Session;

pub struct PageFetcher<'a> {
    transport: &'a dyn PortalTransport,
    portal: &'a PortalConfig,
}

impl<'a> PageFetcher<'a> {
    pub fn new(transport: &'a dyn PortalTransport, portal: &'a PortalConfig) -> Self {
        Self { transport, portal }
    }

    /// Fetches a 1-indexed listing page.
    ///
    /// No page size is assumed; callers rely on the returned `total_pages`.
    pub async fn fetch_page(
        &self,
        page_number: u32,
        session: &Session,
    ) -> Result<ListingPage, AppError> {
        let url = self.portal.listing_url(page_number)?;
        log::info!("Fetching listing page {}", page_number);

        let response = self
            .transport
            .send(PortalRequest::authorized_get(url, session))
            .await?;
        let page = parser::parse_listing_response(response)?;

        log::debug!(
            "Listing page {}/{} holds {} invoice(s)",
            page.page_number,
            page.total_pages,
            page.items.len()
        );
        Ok(page)
    }
}
