//! Stream options and identity keys.

use std::fmt;
use std::path::{Path, PathBuf};

/// Policy for opening a key that is already registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReopenPolicy {
    #[default]
    /// Close the registered stream and replace it with the new one
    Replace,
    /// Return an error and keep the registered stream
    Reject,
}

impl ReopenPolicy {
    /// Parse a policy from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "replace" => Some(ReopenPolicy::Replace),
            "reject" | "error" => Some(ReopenPolicy::Reject),
            _ => None,
        }
    }
}

/// Settings applied when a stream is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StreamOptions {
    /// Restart from byte 0 after end-of-input
    pub looping: bool,
    /// Capture the first CSV record as the header
    pub has_header: bool,
    /// Absolute byte offset of the first read
    pub start_offset: u64,
}

impl StreamOptions {
    /// Create options with looping, header capture and offset all off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable looping.
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Enable or disable header capture.
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Set the start offset.
    pub fn with_start_offset(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self
    }
}

/// Identity of an open stream: the path as given plus its options.
///
/// Two opens with the same path and options map to the same key; any
/// difference in options yields an independent stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StreamKey {
    path: PathBuf,
    options: StreamOptions,
}

impl StreamKey {
    /// Create a key. The path is used as given, not canonicalized.
    pub fn new(path: impl Into<PathBuf>, options: StreamOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the options the stream was opened with.
    pub fn options(&self) -> StreamOptions {
        self.options
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.path.display(),
            self.options.looping,
            self.options.has_header,
            self.options.start_offset
        )
    }
}
