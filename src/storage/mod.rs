// src/storage/mod.rs
//! Filesystem persistence for collected bills.
//!
//! PDFs land next to a `bills.json` manifest. Bills already recorded in the
//! manifest are skipped, so repeated runs only fetch new invoices.

mod directory_store;
mod pdf_text;
mod types;

pub use directory_store::DirectoryStore;
pub use pdf_text::{PdfExtractText, PdfTextSource, PdftotextCommand};
pub use types::{FailedSave, Manifest, SaveOptions, SaveReport};
