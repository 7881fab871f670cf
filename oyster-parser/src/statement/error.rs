//! Statement parsing errors.
//!
//! Every variant is fatal for the document being parsed. The parser targets
//! one known statement format, so a mismatch means either a new extraction
//! defect or a new format, and the caller needs to see the offending input.

use chrono::NaiveDate;

/// Errors from parsing a statement's text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatementError {
    /// Price, time or label content before the first date line
    #[error("line {line_number}: unexpected content before the first date: '{line}'")]
    UnexpectedLeadingContent { line_number: usize, line: String },

    /// A decimal amount that cannot be a single charge
    #[error("line {line_number}: price {amount} out of range [0, 100): '{line}'")]
    PriceOutOfRange {
        line_number: usize,
        line: String,
        amount: f64,
    },

    /// A day block whose shape cannot be repaired or walked
    #[error("malformed block for {date}: {reason} [{items}]")]
    MalformedBlock {
        date: NaiveDate,
        reason: &'static str,
        /// The block's items, rendered for diagnosis
        items: String,
    },
}
