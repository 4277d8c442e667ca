// src/model/bill.rs
//! The normalized bill record handed to the store.

use crate::constants::{BILL_METADATA_VERSION, FILE_NAME_DATE_FORMAT, PLACEHOLDER_CURRENCY};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One invoice with its download reference and financial metadata.
///
/// Only the amount and currency change after construction, through
/// [`BillRecord::record_amount`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    vendor: String,
    date: NaiveDate,
    amount: Decimal,
    currency: String,
    file_url: String,
    file_name: String,
    metadata: BillMetadata,
}

/// Import bookkeeping attached to every bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillMetadata {
    pub import_date: DateTime<Utc>,
    pub version: u32,
}

impl BillRecord {
    /// Creates a bill whose amount is still unknown.
    ///
    /// The amount is zero and the currency is the placeholder until a PDF
    /// yields the real values.
    pub fn provisional(
        vendor: &str,
        date: NaiveDate,
        file_url: impl Into<String>,
        document_token: &str,
        import_date: DateTime<Utc>,
    ) -> Self {
        Self {
            vendor: vendor.to_string(),
            date,
            amount: Decimal::ZERO,
            currency: PLACEHOLDER_CURRENCY.to_string(),
            file_url: file_url.into(),
            file_name: bill_file_name(date, vendor, document_token),
            metadata: BillMetadata {
                import_date,
                version: BILL_METADATA_VERSION,
            },
        }
    }

    /// Records the amount and currency read from the invoice.
    pub fn record_amount(&mut self, amount: Decimal, currency: impl Into<String>) {
        self.amount = amount;
        self.currency = currency.into();
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn metadata(&self) -> &BillMetadata {
        &self.metadata
    }

    /// Whether the amount is still the placeholder.
    pub fn has_placeholder_amount(&self) -> bool {
        self.amount.is_zero() && self.currency == PLACEHOLDER_CURRENCY
    }
}

/// Builds the deterministic file name `YYYY-MM-DD_<vendor>_<token>.pdf`.
///
/// Independent of the amount so that re-imports of the same invoice map to
/// the same file.
pub fn bill_file_name(date: NaiveDate, vendor: &str, document_token: &str) -> String {
    let token = document_token
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect::<String>();

    format!(
        "{}_{}_{}.pdf",
        date.format(FILE_NAME_DATE_FORMAT),
        vendor,
        token
    )
}
