//! Record formats applied to bytes pulled from a stream cursor.
//!
//! Parsers here hold no reader state. The cursor in `crate::io` decides how many
//! bytes make up a record; these functions only turn those bytes into values.
//!
//! This module provides:
//! - `RecordFormat`: The two read interpretations of a stream
//! - `FormatError`: Errors that can occur while parsing a record
//! - Line helpers (`plaintext`) and CSV helpers (`csv`)

mod csv;
mod plaintext;

pub use self::csv::{QuoteState, parse_csv_record, scan_quotes};
pub use self::plaintext::{decode_line, trim_line_terminator};

use thiserror::Error;

/// The read interpretations available on a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordFormat {
    /// Newline-delimited text
    #[default]
    Line,
    /// Comma-separated, quote-escaped records
    Csv,
}

impl std::fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFormat::Line => write!(f, "line"),
            RecordFormat::Csv => write!(f, "csv"),
        }
    }
}

impl RecordFormat {
    /// Parse a record format from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "line" | "lines" | "text" | "txt" | "plaintext" => Some(RecordFormat::Line),
            "csv" => Some(RecordFormat::Csv),
            _ => None,
        }
    }
}

/// Errors that can occur during format operations.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A quoted field was still open when the input ended
    #[error("unterminated quoted field")]
    UnterminatedQuote,

    /// Record bytes rejected by the CSV parser
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Serialization/deserialization error
    #[error("Serde error: {0}")]
    Serde(Box<dyn std::error::Error + Send + Sync>),
}
