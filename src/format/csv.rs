//! CSV format helpers.
//!
//! A CSV record may span several physical lines when a quoted field contains a
//! newline. `scan_quotes` tracks just enough state to tell whether a record is
//! complete at the end of a line; `parse_csv_record` then splits the complete
//! record with the csv crate.

use super::FormatError;

/// Quoting state at the end of a scanned chunk of record bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    /// At the start of a field
    #[default]
    FieldStart,
    /// Inside an unquoted field, where `"` is literal
    Unquoted,
    /// Inside a quoted field
    Quoted,
    /// Just saw a `"` inside a quoted field: either a closing quote or the
    /// first half of a `""` escape
    QuoteInQuoted,
}

impl QuoteState {
    /// True when a line break at this point would be part of a field.
    pub fn is_open(self) -> bool {
        matches!(self, QuoteState::Quoted)
    }
}

/// Advance the quoting state over `bytes` (no line terminator expected at the
/// end, embedded ones from earlier lines are not passed again).
pub fn scan_quotes(bytes: &[u8], mut state: QuoteState) -> QuoteState {
    for &b in bytes {
        state = match (state, b) {
            (QuoteState::FieldStart, b'"') => QuoteState::Quoted,
            (QuoteState::FieldStart, b',') => QuoteState::FieldStart,
            (QuoteState::FieldStart, _) => QuoteState::Unquoted,
            (QuoteState::Unquoted, b',') => QuoteState::FieldStart,
            (QuoteState::Unquoted, _) => QuoteState::Unquoted,
            (QuoteState::Quoted, b'"') => QuoteState::QuoteInQuoted,
            (QuoteState::Quoted, _) => QuoteState::Quoted,
            // `""` is an escaped quote, anything else closes the field
            (QuoteState::QuoteInQuoted, b'"') => QuoteState::Quoted,
            (QuoteState::QuoteInQuoted, b',') => QuoteState::FieldStart,
            (QuoteState::QuoteInQuoted, _) => QuoteState::Unquoted,
        };
    }
    state
}

/// Split one complete CSV record (without its final line terminator) into
/// fields.
///
/// A lone `\r` is field content, not a record end.
pub fn parse_csv_record(record: &[u8]) -> Result<Vec<String>, FormatError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(record);

    let mut fields = csv::StringRecord::new();
    if !rdr.read_record(&mut fields)? {
        return Ok(Vec::new());
    }
    Ok(fields.iter().map(str::to_owned).collect())
}
