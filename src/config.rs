// src/config.rs
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_GET_ATTEMPTS, INVOICES_PATH, LOGIN_PATH, MAX_DOCUMENT_CONCURRENCY,
    MIN_DOCUMENT_CONCURRENCY, PAGE_NUMBER_PARAM, VENDOR,
};
use crate::error::AppError;
use crate::storage::SaveOptions;
use crate::types::{Credentials, DocumentId, Email, Password, ValidatedUrl, ValidationError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use url::Url;

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Account email used to log in to the customer portal
    #[arg(short, long, env = "TELECOOP_EMAIL")]
    pub email: String,

    /// Directory receiving the PDFs and the bills.json manifest
    #[arg(short, long, default_value = "bills")]
    pub output_dir: String,

    /// Root URL of the customer-portal API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of concurrent invoice lookups per listing page (default: auto)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Stop after this many listing pages even if the portal reports more
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Account identifier recorded as `sourceAccount` in bills.json
    #[arg(long, env = "TELECOOP_SOURCE_ACCOUNT")]
    pub source_account: Option<String>,

    /// How text is read from downloaded PDFs
    #[arg(long, value_enum, default_value_t = TextExtraction::Builtin)]
    pub text_extraction: TextExtraction,

    /// Attempts for idempotent GET requests before giving up
    #[arg(long, default_value_t = DEFAULT_GET_ATTEMPTS)]
    pub retries: u32,

    /// Collect bills and print them as JSON without downloading any PDF
    #[arg(long, default_value_t = false)]
    pub no_download: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// PDF text backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextExtraction {
    /// In-process parsing with the `pdf-extract` crate
    Builtin,
    /// Poppler's `pdftotext` program, which must be on `PATH`
    Pdftotext,
}

/// Where the vendor lives and how its endpoints are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub vendor: String,
    pub base_url: ValidatedUrl,
}

impl PortalConfig {
    pub fn new(base_url: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            vendor: VENDOR.to_string(),
            base_url: ValidatedUrl::parse(base_url)?,
        })
    }

    /// Login endpoint.
    pub fn login_url(&self) -> Result<Url, AppError> {
        self.endpoint(LOGIN_PATH)
    }

    /// Listing endpoint for a 1-indexed page.
    ///
    /// The first page is requested without a page parameter.
    pub fn listing_url(&self, page_number: u32) -> Result<Url, AppError> {
        let mut url = self.endpoint(INVOICES_PATH)?;
        if page_number > 1 {
            url.query_pairs_mut()
                .append_pair(PAGE_NUMBER_PARAM, &page_number.to_string());
        }
        Ok(url)
    }

    /// Per-invoice endpoint returning the download link.
    pub fn document_url(&self, id: &DocumentId) -> Result<Url, AppError> {
        self.endpoint(&format!("{}/{}", INVOICES_PATH, id.as_str()))
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        let mut base = self.base_url.as_url().clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path)?)
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            vendor: VENDOR.to_string(),
            base_url: ValidatedUrl::parse(DEFAULT_BASE_URL)
                .expect("Default portal URL should be valid"),
        }
    }
}

/// Resolved pipeline configuration, validated and ready to drive a run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub credentials: Credentials,
    pub portal: PortalConfig,
    pub output_dir: PathBuf,
    pub concurrency: usize,
    pub max_pages: Option<u32>,
    pub get_attempts: u32,
    pub download: bool,
    pub source_account: Option<String>,
    pub text_extraction: TextExtraction,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    ///
    /// The password is only ever read from `TELECOOP_PASSWORD`.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let password = std::env::var("TELECOOP_PASSWORD").map_err(|_| {
            AppError::MissingConfiguration(
                "TELECOOP_PASSWORD environment variable not set".to_string(),
            )
        })?;
        Self::from_parts(cli, password)
    }

    fn from_parts(cli: CommandLineInput, password: String) -> Result<Self, AppError> {
        let credentials = Credentials::new(Email::new(cli.email)?, Password::new(password)?);
        let portal = PortalConfig::new(&cli.base_url)?;

        let concurrency = match cli.concurrency {
            Some(0) => {
                return Err(ValidationError::OutOfBounds {
                    value: 0,
                    min: 1,
                    max: MAX_DOCUMENT_CONCURRENCY as u32,
                }
                .into())
            }
            Some(n) => n.min(MAX_DOCUMENT_CONCURRENCY),
            None => default_concurrency(),
        };

        if cli.max_pages == Some(0) {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u32::MAX,
            }
            .into());
        }

        let source_account = cli
            .source_account
            .map(|account| account.trim().to_string())
            .filter(|account| !account.is_empty());

        Ok(PipelineConfig {
            credentials,
            portal,
            output_dir: PathBuf::from(cli.output_dir),
            concurrency,
            max_pages: cli.max_pages,
            get_attempts: cli.retries.max(1),
            download: !cli.no_download,
            source_account,
            text_extraction: cli.text_extraction,
            verbose: cli.verbose,
        })
    }

    /// Manifest options for this account.
    pub fn save_options(&self) -> SaveOptions {
        let options = SaveOptions::for_account(self.credentials.email.as_str());
        match &self.source_account {
            Some(account) => options.with_source_account(account.as_str()),
            None => options,
        }
    }
}

/// Concurrency used when none is requested: the CPU count, kept within the
/// portal-friendly bounds.
pub fn default_concurrency() -> usize {
    num_cpus::get().clamp(MIN_DOCUMENT_CONCURRENCY, MAX_DOCUMENT_CONCURRENCY)
}
