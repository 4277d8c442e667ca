// src/storage/types.rs
//! Type definitions for persistence operations.

use crate::constants::{BILL_CONTENT_TYPE, VENDOR};
use crate::model::BillRecord;
use serde::{Deserialize, Serialize};

/// Identifies the account and the kind of documents being stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOptions {
    pub source_account: Option<String>,
    pub source_account_identifier: String,
    pub identifiers: Vec<String>,
    pub content_type: String,
}

impl SaveOptions {
    /// Options for a TeleCoop account identified by its login.
    pub fn for_account(source_account_identifier: impl Into<String>) -> Self {
        Self {
            source_account: None,
            source_account_identifier: source_account_identifier.into(),
            identifiers: vec![VENDOR.to_string()],
            content_type: BILL_CONTENT_TYPE.to_string(),
        }
    }

    pub fn with_source_account(mut self, source_account: impl Into<String>) -> Self {
        self.source_account = Some(source_account.into());
        self
    }
}

/// Contents of `bills.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(flatten)]
    pub options: SaveOptions,
    #[serde(default)]
    pub bills: Vec<BillRecord>,
}

impl Manifest {
    pub fn new(options: SaveOptions) -> Self {
        Self {
            options,
            bills: Vec::new(),
        }
    }
}

/// Outcome of a save.
#[derive(Debug, Clone, Default)]
pub struct SaveReport {
    /// File names of newly stored bills
    pub saved: Vec<String>,
    /// File names already present
    pub skipped: Vec<String>,
    pub failed: Vec<FailedSave>,
    /// How many stored bills got their amount from the PDF
    pub amounts_extracted: usize,
    pub bytes_written: usize,
}

impl SaveReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(
        mut self,
        file_name: impl Into<String>,
        bytes: usize,
        extracted: bool,
    ) -> Self {
        self.saved.push(file_name.into());
        self.bytes_written += bytes;
        if extracted {
            self.amounts_extracted += 1;
        }
        self
    }

    pub fn with_skipped(mut self, file_name: impl Into<String>) -> Self {
        self.skipped.push(file_name.into());
        self
    }

    pub fn with_failed(mut self, failure: FailedSave) -> Self {
        self.failed.push(failure);
        self
    }

    /// Checks if every bill was stored or already present.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A bill that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedSave {
    pub file_name: String,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_for_account() {
        let options = SaveOptions::for_account("jane@example.org").with_source_account("acc-1");
        assert_eq!(options.identifiers, vec!["telecoop".to_string()]);
        assert_eq!(options.content_type, "application/pdf");
        assert_eq!(options.source_account.as_deref(), Some("acc-1"));
    }

    #[test]
    fn test_manifest_json_shape() {
        let manifest = Manifest::new(SaveOptions::for_account("jane@example.org"));
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["sourceAccountIdentifier"], "jane@example.org");
        assert_eq!(json["contentType"], "application/pdf");
        assert_eq!(json["identifiers"][0], "telecoop");
        assert!(json["bills"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_report_counts() {
        let report = SaveReport::new()
            .with_saved("a.pdf", 10, true)
            .with_saved("b.pdf", 5, false)
            .with_skipped("c.pdf");
        assert_eq!(report.bytes_written, 15);
        assert_eq!(report.amounts_extracted, 1);
        assert!(report.is_success());

        let report = report.with_failed(FailedSave {
            file_name: "d.pdf".to_string(),
            error: "404".to_string(),
        });
        assert!(!report.is_success());
    }
}
