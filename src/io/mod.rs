//! I/O abstractions for stream sources and the record cursor.
//!
//! This module provides:
//! - `InputProvider`: Trait for seekable input sources
//! - `FileInput`: Local file implementation
//! - `InMemorySource`: In-memory implementation for testing
//! - `RecordCursor`: Buffered cursor that pulls one line or CSV record at a time

mod cursor;
mod input;
mod memory;
mod std_io;

pub use cursor::RecordCursor;
pub use input::{InputProvider, ReadSeek};
pub use memory::InMemorySource;
pub use std_io::FileInput;
