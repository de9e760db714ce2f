//! CLI integration helpers for filestreams.
//!
//! `ReplayArgs` describes one stream to open and how many records to pull from
//! it; `run_replay` performs the reads and writes each record to a writer. The
//! `filestreams_replay` binary wires these to `sarge`.
//!
//! # Example
//!
//! ```rust,ignore
//! use filestreams::cli::{ReplayArgs, run_replay};
//! use filestreams::format::RecordFormat;
//!
//! let args = ReplayArgs::new("users.csv")
//!     .with_header(true)
//!     .with_mode(RecordFormat::Csv);
//! let summary = run_replay(&args, &mut std::io::stdout())?;
//! eprintln!("resume at byte {}", summary.position);
//! ```

use std::io::Write;

use thiserror::Error;

use crate::config::StreamOptions;
use crate::error::StreamError;
use crate::format::RecordFormat;
use crate::registry::StreamRegistry;

#[cfg(feature = "sarge")]
mod sarge;

/// A read mode string that is neither `line` nor `csv`.
#[derive(Debug, Error)]
#[error("unknown read mode: {0} (expected line|csv)")]
pub struct UnknownMode(pub String);

/// Arguments for replaying a single stream.
#[derive(Debug, Clone, Default)]
pub struct ReplayArgs {
    /// File to open.
    pub path: String,
    /// Open options.
    pub options: StreamOptions,
    /// Read interpretation.
    pub mode: RecordFormat,
    /// Number of records to emit. `None` reads one pass up to end-of-input.
    pub count: Option<usize>,
}

impl ReplayArgs {
    /// Create arguments for a path with default options.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.options = self.options.with_loop(looping);
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.options = self.options.with_header(has_header);
        self
    }

    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.options = self.options.with_start_offset(offset);
        self
    }

    pub fn with_mode(mut self, mode: RecordFormat) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

/// Outcome of a replay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Records written
    pub records: usize,
    /// Byte offset to resume from
    pub position: u64,
}

/// Parse a read mode string.
pub fn parse_mode(s: &str) -> Result<RecordFormat, UnknownMode> {
    RecordFormat::from_str(s).ok_or_else(|| UnknownMode(s.to_string()))
}

/// Open the stream described by `args` and write its records to `out`, one
/// per line.
///
/// CSV records are written as JSON arrays when the `json` feature is enabled
/// and comma-joined otherwise. With a count on a looping stream, reading wraps
/// around until the count is reached; an empty looping file stops after two
/// consecutive end-of-input reads.
pub fn run_replay(args: &ReplayArgs, out: &mut dyn Write) -> Result<ReplaySummary, StreamError> {
    let registry = StreamRegistry::new();
    let key = registry.open(&args.path, args.options)?;
    let stream = registry.get(&key).ok_or(StreamError::Closed)?;

    let mut records = 0;
    let mut boundary_seen = false;
    while args.count.is_none_or(|n| records < n) {
        let read = match args.mode {
            RecordFormat::Line => stream.read_line()?,
            RecordFormat::Csv => stream.read_csv_record()?.map(render_fields).transpose()?,
        };

        match read {
            Some(text) => {
                writeln!(out, "{text}")?;
                records += 1;
                boundary_seen = false;
            }
            None => {
                if !stream.is_looping() || args.count.is_none() || boundary_seen {
                    break;
                }
                boundary_seen = true;
            }
        }
    }

    let position = stream.position()?;
    registry.close(&key);
    Ok(ReplaySummary { records, position })
}

#[cfg(feature = "json")]
fn render_fields(fields: Vec<String>) -> Result<String, StreamError> {
    serde_json::to_string(&fields).map_err(|e| StreamError::Io(e.into()))
}

#[cfg(not(feature = "json"))]
fn render_fields(fields: Vec<String>) -> Result<String, StreamError> {
    Ok(fields.join(","))
}
