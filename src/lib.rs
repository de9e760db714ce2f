//! # filestreams
//!
//! Looping, resumable line and CSV readers over local files, for replaying
//! file-backed data into a workload generator.
//!
//! ## Overview
//!
//! filestreams provides:
//! - **Stream registry**: Open files once, address them by a key derived from the
//!   path and open options
//! - **Two read views**: Newline-delimited lines or CSV records over one cursor
//! - **Looping**: Rewind to the start of the file after end-of-input
//! - **Resumable positioning**: Start at any byte offset, read back the current
//!   offset to resume later
//! - **Header capture**: Keep the first CSV record as field names
//! - **Replay configuration**: Open a set of streams from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use filestreams::{StreamOptions, StreamRegistry};
//!
//! fn main() -> Result<(), filestreams::StreamError> {
//!     let registry = StreamRegistry::new();
//!     let key = registry.open("users.csv", StreamOptions::new().with_header(true))?;
//!
//!     let stream = registry.get(&key).expect("just opened");
//!     println!("columns: {:?}", stream.headers());
//!     while let Some(fields) = stream.read_csv_record()? {
//!         println!("{fields:?}");
//!     }
//!
//!     registry.close(&key);
//!     Ok(())
//! }
//! ```
//!
//! ## Read semantics
//!
//! - Each read returns `Ok(Some(..))` for a record and `Ok(None)` for the read
//!   that reaches end-of-input. Without looping, every later read also returns
//!   `Ok(None)`.
//! - With looping, the end-of-input read rewinds to byte 0 and the next read
//!   starts the next cycle. The rewind ignores the header and the start offset,
//!   so a header row comes back as a data record on later cycles.
//! - Line reads and CSV reads share one cursor. A read of either kind starts
//!   where the previous read stopped.
//! - Reads block the calling thread on file I/O. There is no timeout.
//!
//! ## Features
//!
//! - `json` - JSON replay configs and JSON output in the CLI (enabled by default)
//! - `yaml` - YAML replay configs
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - The `filestreams_replay` binary

// Core modules
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod registry;
pub mod stream;

// Re-exports for convenience
pub use builder::{ReplayBuilder, ReplaySet};
pub use config::{ReopenPolicy, ReplayConfig, StreamConfig, StreamKey, StreamOptions};
pub use error::{AggregateError, ErrorPolicy, OpenErrorKind, SingleIoError, Stage, StreamError};
pub use format::{FormatError, RecordFormat};
pub use io::{FileInput, InMemorySource, InputProvider, ReadSeek, RecordCursor};
pub use registry::StreamRegistry;
pub use stream::{FileStream, Lines, Records};

/// Open every stream of a `ReplayConfig` into a new registry.
pub fn build_registry_from_config(
    config: ReplayConfig,
) -> Result<(StreamRegistry, ReplaySet), AggregateError> {
    ReplayBuilder::from_replay_config(config)?.build()
}

/// Open every stream of a `ReplayConfig`, allowing the caller to adjust the
/// `ReplayBuilder` first (extra streams, a different policy).
pub fn build_registry_from_config_with<F>(
    config: ReplayConfig,
    customize: F,
) -> Result<(StreamRegistry, ReplaySet), AggregateError>
where
    F: FnOnce(ReplayBuilder) -> ReplayBuilder,
{
    let builder = ReplayBuilder::from_replay_config(config)?;
    customize(builder).build()
}

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::IoDiagnostic;

// Internal test modules (see src/tests)
#[cfg(test)]
mod tests;
