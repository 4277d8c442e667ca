// src/api/collector.rs
//! Drives a full collection run: log in once, walk the listing, resolve
//! every invoice.
//!
//! The run is all or nothing. Any failed request or unreadable date aborts
//! it and nothing collected so far is returned; a new run starts from the
//! first page again.

use super::authenticator::Authenticator;
use super::document_resolver::DocumentResolver;
use super::page_fetcher::PageFetcher;
use super::simple_pagination::{fetch_all_numbered_pages, NumberedPage};
use super::PortalTransport;
use crate::config::{PipelineConfig, PortalConfig};
use crate::error::AppError;
use crate::model::BillRecord;
use crate::pipeline::BillSource;
use crate::types::Credentials;
use chrono::Utc;
use std::sync::Arc;

/// Every bill of the account, in listing order.
#[derive(Debug, Clone)]
pub struct CollectionReport {
    pub bills: Vec<BillRecord>,
    pub pages_fetched: u32,
}

/// Collects all bills of an account through a [`PortalTransport`].
pub struct BillCollector {
    transport: Arc<dyn PortalTransport>,
    portal: PortalConfig,
    concurrency: usize,
    max_pages: Option<u32>,
}

impl BillCollector {
    pub fn new(transport: Arc<dyn PortalTransport>, config: &PipelineConfig) -> Self {
        Self {
            transport,
            portal: config.portal.clone(),
            concurrency: config.concurrency,
            max_pages: config.max_pages,
        }
    }

    /// Creates a collector with explicit portal settings.
    pub fn with_portal(
        transport: Arc<dyn PortalTransport>,
        portal: PortalConfig,
        concurrency: usize,
    ) -> Self {
        Self {
            transport,
            portal,
            concurrency: concurrency.max(1),
            max_pages: None,
        }
    }

    /// Caps the number of listing pages walked.
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Authenticates, then walks every listing page and resolves its invoices.
    pub async fn run(&self, credentials: &Credentials) -> Result<CollectionReport, AppError> {
        let transport = self.transport.as_ref();
        let session = Authenticator::new(transport, &self.portal)
            .authenticate(credentials)
            .await?;

        let fetcher = PageFetcher::new(transport, &self.portal);
        let resolver =
            DocumentResolver::new(transport, &self.portal, self.concurrency, Utc::now());

        log::info!("Fetching the list of documents");
        let (fetcher, resolver, session) = (&fetcher, &resolver, &session);
        let result = fetch_all_numbered_pages(
            move |page_number| async move {
                let page = fetcher.fetch_page(page_number, session).await?;
                log::info!("Parsing {} document(s) of page {}", page.items.len(), page_number);
                let bills = resolver.resolve_page(&page.items, session).await?;
                Ok::<_, AppError>(NumberedPage {
                    page_number: page.page_number,
                    total_pages: page.total_pages,
                    items: bills,
                })
            },
            self.max_pages,
        )
        .await?;

        log::info!(
            "Collected {} bill(s) from {} listing page(s)",
            result.items.len(),
            result.pages_fetched
        );

        Ok(CollectionReport {
            bills: result.items,
            pages_fetched: result.pages_fetched,
        })
    }
}

#[async_trait::async_trait]
impl BillSource for BillCollector {
    async fn collect(&self, credentials: &Credentials) -> Result<CollectionReport, AppError> {
        self.run(credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockPortal;
    use crate::types::{Email, Password};
    use pretty_assertions::assert_eq;
    use reqwest::{Method, StatusCode};

    const BASE: &str = "https://portal.example";

    fn credentials() -> Credentials {
        Credentials::new(
            Email::new("jane@example.org").unwrap(),
            Password::new("pw").unwrap(),
        )
    }

    fn mock_with_login() -> MockPortal {
        let mock = MockPortal::new();
        mock.respond(
            Method::POST,
            &format!("{}/api/customer/login", BASE),
            StatusCode::OK,
            r#"{"token": "tok", "token_type": "Bearer"}"#,
        );
        mock
    }

    fn serve_page(mock: &MockPortal, page: u32, total: u32, ids: &[u32]) {
        let url = if page == 1 {
            format!("{}/api/customer/invoices", BASE)
        } else {
            format!("{}/api/customer/invoices?pagenum={}", BASE, page)
        };
        let data: Vec<_> = ids
            .iter()
            .map(|id| {
                serde_json::json!({
                    "id": id,
                    "formatted_created": format!("{:02}/01/2024", id),
                    "ident": format!("FA{}", id),
                })
            })
            .collect();
        mock.respond(
            Method::GET,
            &url,
            StatusCode::OK,
            serde_json::json!({"meta": {"pagenum": page, "nbpages": total}, "data": data})
                .to_string(),
        );
        for id in ids {
            mock.respond(
                Method::GET,
                &format!("{}/api/customer/invoices/{}", BASE, id),
                StatusCode::OK,
                format!(r#"{{"link": "https://files.example/{}.pdf"}}"#, id),
            );
        }
    }

    fn collector(mock: Arc<MockPortal>) -> BillCollector {
        BillCollector::with_portal(mock, PortalConfig::new(BASE).unwrap(), 4)
    }

    fn listing_fetches(mock: &MockPortal) -> Vec<String> {
        mock.get_urls()
            .into_iter()
            .filter(|u| u.ends_with("/invoices") || u.contains("pagenum="))
            .collect()
    }

    #[tokio::test]
    async fn test_two_page_listing_yields_three_bills_in_order() {
        let mock = Arc::new(mock_with_login());
        serve_page(&mock, 1, 2, &[1, 2]);
        serve_page(&mock, 2, 2, &[3]);

        let report = collector(mock.clone()).run(&credentials()).await.unwrap();

        let names: Vec<_> = report.bills.iter().map(|b| b.file_name()).collect();
        assert_eq!(
            names,
            vec![
                "2024-01-01_telecoop_FA1.pdf",
                "2024-01-02_telecoop_FA2.pdf",
                "2024-01-03_telecoop_FA3.pdf",
            ]
        );
        assert_eq!(report.pages_fetched, 2);
        assert_eq!(
            listing_fetches(&mock),
            vec![
                format!("{}/api/customer/invoices", BASE),
                format!("{}/api/customer/invoices?pagenum=2", BASE),
            ]
        );
    }

    #[tokio::test]
    async fn test_every_request_after_login_is_authorized() {
        let mock = Arc::new(mock_with_login());
        serve_page(&mock, 1, 1, &[5]);

        collector(mock.clone()).run(&credentials()).await.unwrap();

        let requests = mock.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].authorization, None);
        for request in &requests[1..] {
            assert_eq!(request.authorization.as_deref(), Some("Bearer tok"));
        }
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_an_error() {
        let mock = Arc::new(mock_with_login());
        serve_page(&mock, 1, 1, &[]);

        let report = collector(mock.clone()).run(&credentials()).await.unwrap();
        assert!(report.bills.is_empty());
        assert_eq!(report.pages_fetched, 1);
    }

    #[tokio::test]
    async fn test_failed_login_fetches_nothing() {
        let mock = Arc::new(MockPortal::new());
        mock.respond(
            Method::POST,
            &format!("{}/api/customer/login", BASE),
            StatusCode::FORBIDDEN,
            "{}",
        );

        let err = collector(mock.clone())
            .run(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::AuthenticationFailed { .. }));
        assert!(mock.get_urls().is_empty());
    }

    #[tokio::test]
    async fn test_failure_on_later_page_aborts_run() {
        let mock = Arc::new(mock_with_login());
        serve_page(&mock, 1, 3, &[1]);
        // page 2 is never registered and answers 404

        let err = collector(mock.clone())
            .run(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::FetchFailed { status: StatusCode::NOT_FOUND, .. }
        ));
    }

    #[tokio::test]
    async fn test_file_names_stable_across_runs() {
        let mock = Arc::new(mock_with_login());
        serve_page(&mock, 1, 1, &[1, 2]);

        let first = collector(mock.clone()).run(&credentials()).await.unwrap();
        let second = collector(mock.clone()).run(&credentials()).await.unwrap();

        let names = |report: &CollectionReport| {
            report
                .bills
                .iter()
                .map(|b| b.file_name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(&first), names(&second));
    }
}
