//! Error types and policies for filestreams.
//!
//! This module provides:
//! - `StreamError`: Errors raised while opening or reading a file stream
//! - `OpenErrorKind`: Classification of open-time filesystem failures
//! - `ErrorPolicy`: Controls whether replay setup fails fast or accumulates errors
//! - `Stage`: Indicates where a replay setup error occurred
//! - `SingleIoError`: A single replay setup error with context
//! - `AggregateError`: A collection of errors when using `Accumulate` policy

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::StreamKey;

/// Why the filesystem refused to open a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenErrorKind {
    NotFound,
    PermissionDenied,
    Other,
}

impl From<io::ErrorKind> for OpenErrorKind {
    fn from(kind: io::ErrorKind) -> Self {
        match kind {
            io::ErrorKind::NotFound => OpenErrorKind::NotFound,
            io::ErrorKind::PermissionDenied => OpenErrorKind::PermissionDenied,
            _ => OpenErrorKind::Other,
        }
    }
}

impl fmt::Display for OpenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenErrorKind::NotFound => write!(f, "not found"),
            OpenErrorKind::PermissionDenied => write!(f, "permission denied"),
            OpenErrorKind::Other => write!(f, "open failed"),
        }
    }
}

/// Errors that can occur while opening, reading or closing a stream.
///
/// End-of-input is never an error: reads report it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The file could not be opened
    #[error("cannot open '{}': {kind}", .path.display())]
    Open {
        path: PathBuf,
        kind: OpenErrorKind,
        #[source]
        source: io::Error,
    },

    /// A stream with the same key is registered and the registry rejects re-opens
    #[error("stream '{0}' is already open")]
    AlreadyOpen(StreamKey),

    /// Read or seek failure other than end-of-input
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The record starting at `offset` is not valid CSV
    #[error("malformed CSV record at byte {offset}: {message}")]
    MalformedCsv { offset: u64, message: String },

    /// A well-formed record did not fit the requested type
    #[error("cannot deserialize CSV record: {0}")]
    Deserialize(#[source] csv::Error),

    /// The stream has been closed
    #[error("stream is closed")]
    Closed,
}

impl StreamError {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StreamError::Open {
            path: path.into(),
            kind: source.kind().into(),
            source,
        }
    }

    /// The open failure classification, if this is an open error.
    pub fn open_kind(&self) -> Option<OpenErrorKind> {
        match self {
            StreamError::Open { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    FastFail,
    /// Collect all errors and return them together
    #[default]
    Accumulate,
}

impl ErrorPolicy {
    /// Parse a policy from a config string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fast_fail" | "fastfail" | "fast-fail" => Some(ErrorPolicy::FastFail),
            "accumulate" => Some(ErrorPolicy::Accumulate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while interpreting the replay configuration
    Config,
    /// Error while opening a configured stream
    Open,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Config => write!(f, "Config"),
            Stage::Open => write!(f, "Open"),
        }
    }
}

#[derive(Debug)]
pub struct SingleIoError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the configured stream (or the config field)
    pub target: String,
    /// The underlying error
    pub error: Box<dyn std::error::Error + Send + Sync>,
}

impl SingleIoError {
    pub(crate) fn config(target: impl Into<String>, message: impl Into<String>) -> Self {
        SingleIoError {
            stage: Stage::Config,
            target: target.into(),
            error: Box::new(io::Error::new(io::ErrorKind::InvalidInput, message.into())),
        }
    }
}

impl fmt::Display for SingleIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for SingleIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// An aggregate of replay setup errors.
///
/// This is returned when using `ErrorPolicy::Accumulate` and multiple errors occurred.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<SingleIoError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "replay setup encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SingleIoError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<SingleIoError> for AggregateError {
    fn from(error: SingleIoError) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
