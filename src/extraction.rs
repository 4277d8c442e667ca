// src/extraction.rs
//! Reads the net total of an invoice from its PDF text.
//!
//! Invoices carry a line reading exactly `Total net TTC`, followed by a line
//! such as `42,50 €`. Invoices without that line (nothing due, other layout)
//! keep their placeholder amount; this is not an error.

use crate::constants::NET_TOTAL_MARKER;
use crate::model::BillRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

/// The ability to fill in a bill's amount from the text of its PDF.
///
/// Stores call this once per downloaded PDF, before the bill is persisted.
pub trait AmountExtractor: Send + Sync {
    /// Updates `bill` when `pdf_text` holds a recognizable amount.
    ///
    /// Returns whether the bill was updated. Only the amount and currency
    /// may change.
    fn extract(&self, bill: &mut BillRecord, pdf_text: &str) -> bool;
}

/// Finds the amount on the line after a fixed marker line.
#[derive(Debug, Clone)]
pub struct NetTotalExtractor {
    marker: String,
}

impl NetTotalExtractor {
    pub fn new() -> Self {
        Self::with_marker(NET_TOTAL_MARKER)
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for NetTotalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl AmountExtractor for NetTotalExtractor {
    fn extract(&self, bill: &mut BillRecord, pdf_text: &str) -> bool {
        match find_amount_after_marker(pdf_text, &self.marker) {
            Some(NetTotal { amount, currency }) => {
                log::debug!("{}: net total {} {}", bill.file_name(), amount, currency);
                bill.record_amount(amount, currency);
                true
            }
            None => {
                log::debug!(
                    "{}: no '{}' line, keeping placeholder amount",
                    bill.file_name(),
                    self.marker
                );
                false
            }
        }
    }
}

/// Amount and currency read from invoice text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetTotal {
    pub amount: Decimal,
    pub currency: String,
}

/// Locates the first line equal to `marker` and parses the line after it.
///
/// The value line holds a comma-decimal number and a currency symbol
/// separated by whitespace. Returns `None` when the marker is missing, is
/// the last line, or the value line does not parse.
pub fn find_amount_after_marker(text: &str, marker: &str) -> Option<NetTotal> {
    let mut lines = text.lines();
    lines.by_ref().find(|line| *line == marker)?;
    let value_line = lines.next()?;

    let mut tokens = value_line.split_whitespace();
    let number = tokens.next()?;
    let currency = tokens.next()?;

    match Decimal::from_str(&number.replace(',', ".")) {
        Ok(amount) => Some(NetTotal {
            amount,
            currency: currency.to_string(),
        }),
        Err(e) => {
            log::warn!("Unreadable net total '{}': {}", value_line, e);
            None
        }
    }
}
