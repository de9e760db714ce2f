//! Input provider trait definition.

use std::fmt::Debug;
use std::io::{Read, Seek};

/// A readable, seekable byte source that can move between threads.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Trait for seekable input providers.
///
/// Implementors provide a way to open a fresh handle on a local file or an
/// in-memory buffer. Streams seek freely, so every provider must hand out a
/// `Seek` implementation.
pub trait InputProvider: Send + Sync + Debug {
    /// Returns a unique identifier for this input source.
    ///
    /// This is used as the path part of a stream key and in error messages.
    fn id(&self) -> &str;

    /// Open and return a new handle positioned at the beginning.
    ///
    /// Each call must return an independent handle.
    fn open(&self) -> std::io::Result<Box<dyn ReadSeek>>;
}
