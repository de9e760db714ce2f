//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, OpenErrorKind, SingleIoError, StreamError};

/// A diagnostic wrapper for stream errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct IoDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(error: &StreamError) -> Option<String> {
    let help = match error {
        StreamError::Open {
            kind: OpenErrorKind::NotFound,
            ..
        } => "Check that the path exists relative to the working directory",
        StreamError::Open {
            kind: OpenErrorKind::PermissionDenied,
            ..
        } => "Check the file permissions of the replay data",
        StreamError::AlreadyOpen(_) => {
            "Close the existing stream or use the replace re-open policy"
        }
        StreamError::MalformedCsv { .. } => {
            "Check for an unterminated quoted field or invalid UTF-8"
        }
        StreamError::Deserialize(_) => "Check that the header names match the target fields",
        StreamError::Closed => "The stream was closed before this read",
        _ => return None,
    };
    Some(help.into())
}

impl From<StreamError> for IoDiagnostic {
    fn from(e: StreamError) -> Self {
        IoDiagnostic {
            message: e.to_string(),
            help: help_for(&e),
            source: Some(Box::new(e)),
            severity: Severity::Error,
        }
    }
}

impl From<SingleIoError> for IoDiagnostic {
    fn from(e: SingleIoError) -> Self {
        IoDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            source: Some(e.error),
            help: Some("Check the replay configuration".into()),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for IoDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let first = agg.errors.into_iter().next();
        if let Some(e) = first {
            IoDiagnostic::from(e)
        } else {
            IoDiagnostic {
                message: "Unknown replay setup error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            }
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(IoDiagnostic::from(agg))
    }
}

impl From<StreamError> for miette::Report {
    fn from(e: StreamError) -> Self {
        miette::Report::new(IoDiagnostic::from(e))
    }
}
