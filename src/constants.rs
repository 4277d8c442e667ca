// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Vendor identity
// ---------------------------------------------------------------------------

/// Vendor slug stamped on every bill and embedded in file names.
pub const VENDOR: &str = "telecoop";

/// Root of the TeleCoop customer-portal API.
pub const DEFAULT_BASE_URL: &str = "https://espace-personnel-api.telecoop.fr";

/// Login endpoint, relative to the base URL.
pub const LOGIN_PATH: &str = "api/customer/login";

/// Invoice listing endpoint, relative to the base URL.
///
/// Individual invoices live under `<INVOICES_PATH>/<id>`.
pub const INVOICES_PATH: &str = "api/customer/invoices";

/// Query parameter carrying the 1-indexed listing page number.
pub const PAGE_NUMBER_PARAM: &str = "pagenum";

/// Format of `formatted_created` in listing entries.
pub const LISTING_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format of the date prefix in bill file names.
pub const FILE_NAME_DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Bill defaults
// ---------------------------------------------------------------------------

/// Currency recorded on a bill until its PDF yields the real one.
pub const PLACEHOLDER_CURRENCY: &str = "€";

/// Schema version written into each bill's metadata.
pub const BILL_METADATA_VERSION: u32 = 1;

/// MIME type of the documents handed to the store.
pub const BILL_CONTENT_TYPE: &str = "application/pdf";

// ---------------------------------------------------------------------------
// PDF text
// ---------------------------------------------------------------------------

/// Line that precedes the net total in invoice PDF text.
pub const NET_TOTAL_MARKER: &str = "Total net TTC";

// ---------------------------------------------------------------------------
// Concurrency and transport
// ---------------------------------------------------------------------------

/// Lower bound for concurrent document lookups within one listing page.
pub const MIN_DOCUMENT_CONCURRENCY: usize = 2;

/// Upper bound for concurrent document lookups within one listing page.
///
/// The portal is a small customer API; a listing page rarely holds more
/// than a dozen invoices.
pub const MAX_DOCUMENT_CONCURRENCY: usize = 8;

/// Default number of attempts for idempotent GET requests.
pub const DEFAULT_GET_ATTEMPTS: u32 = 3;

/// First delay between GET retries, in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 250;

/// Ceiling for the GET retry delay, in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 4_000;

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Name of the JSON manifest written next to the downloaded PDFs.
pub const MANIFEST_FILE_NAME: &str = "bills.json";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
