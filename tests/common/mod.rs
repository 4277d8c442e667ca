// tests/common/mod.rs
//! Shared fixtures: an in-memory portal speaking the TeleCoop API shapes.

#![allow(dead_code)]

use reqwest::{Method, StatusCode};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use telecoop_bills::{
    ApiResponse, AppError, Credentials, Email, Password, PdfTextSource, PortalConfig,
    PortalRequest, PortalTransport,
};

pub const BASE: &str = "http://portal.test";

/// Portal fake: one login, a paged listing, links and PDF bytes per invoice.
#[derive(Default)]
pub struct FakePortal {
    responses: Mutex<HashMap<(Method, String), (StatusCode, String)>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    log: Mutex<Vec<(Method, String, Option<String>)>>,
}

impl FakePortal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(self, status: StatusCode) -> Self {
        self.respond(
            Method::POST,
            &format!("{}/api/customer/login", BASE),
            status,
            r#"{"token": "t0k3n", "token_type": "Bearer"}"#,
        );
        self
    }

    /// Registers listing page `page` of `total`, with one invoice per `(id, date)`.
    pub fn with_page(self, page: u32, total: u32, invoices: &[(u32, &str)]) -> Self {
        let url = if page == 1 {
            format!("{}/api/customer/invoices", BASE)
        } else {
            format!("{}/api/customer/invoices?pagenum={}", BASE, page)
        };
        let data: Vec<_> = invoices
            .iter()
            .map(|(id, date)| {
                serde_json::json!({
                    "id": id,
                    "formatted_created": date,
                    "ident": format!("TC{:04}", id),
                })
            })
            .collect();
        self.respond(
            Method::GET,
            &url,
            StatusCode::OK,
            &serde_json::json!({"meta": {"pagenum": page, "nbpages": total}, "data": data})
                .to_string(),
        );
        for (id, _) in invoices {
            let link = format!("{}/files/{}.pdf", BASE, id);
            self.respond(
                Method::GET,
                &format!("{}/api/customer/invoices/{}", BASE, id),
                StatusCode::OK,
                &serde_json::json!({ "link": link }).to_string(),
            );
            self.files
                .lock()
                .unwrap()
                .insert(link, format!("%PDF-1.4 invoice {}", id).into_bytes());
        }
        self
    }

    pub fn respond(&self, method: Method, url: &str, status: StatusCode, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, url.to_string()), (status, body.to_string()));
    }

    /// `(method, url, authorization)` of every API request, in order.
    pub fn log(&self) -> Vec<(Method, String, Option<String>)> {
        self.log.lock().unwrap().clone()
    }

    pub fn listing_requests(&self) -> Vec<String> {
        self.log()
            .into_iter()
            .map(|(_, url, _)| url)
            .filter(|url| url.ends_with("/invoices") || url.contains("pagenum="))
            .collect()
    }
}

#[async_trait::async_trait]
impl PortalTransport for FakePortal {
    async fn send(&self, request: PortalRequest) -> Result<ApiResponse<String>, AppError> {
        let url = request.url.to_string();
        self.log.lock().unwrap().push((
            request.method.clone(),
            url.clone(),
            request.authorization.clone(),
        ));
        let (status, data) = self
            .responses
            .lock()
            .unwrap()
            .get(&(request.method, url.clone()))
            .cloned()
            .unwrap_or((StatusCode::NOT_FOUND, String::new()));
        Ok(ApiResponse { data, status, url })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, AppError> {
        self.files
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::FetchFailed {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            })
    }
}

/// Treats the stored PDF bytes as text and appends a fixed footer.
pub struct FooterText(pub &'static str);

#[async_trait::async_trait]
impl PdfTextSource for FooterText {
    async fn text_of(&self, pdf: &Path) -> Result<String, AppError> {
        let bytes = tokio::fs::read(pdf).await?;
        Ok(format!("{}\n{}", String::from_utf8_lossy(&bytes), self.0))
    }
}

pub fn portal() -> PortalConfig {
    PortalConfig::new(BASE).unwrap()
}

pub fn credentials() -> Credentials {
    Credentials::new(
        Email::new("member@example.coop").unwrap(),
        Password::new("correct horse").unwrap(),
    )
}
