//! Replay configuration for opening a set of streams together.

use serde::Deserialize;

use super::StreamOptions;
#[cfg(any(feature = "json", feature = "yaml"))]
use crate::format::FormatError;

/// Configuration for a set of replayed streams.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayConfig {
    /// Stream configurations
    #[serde(default)]
    pub streams: Vec<StreamConfig>,
    /// Re-open policy: "replace" or "reject"
    #[serde(default)]
    pub reopen_policy: Option<String>,
    /// Error policy: "fast_fail" or "accumulate"
    #[serde(default)]
    pub error_policy: Option<String>,
}

/// Configuration for a single stream.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamConfig {
    /// Unique identifier for this stream
    pub id: String,
    /// File path
    pub path: String,
    #[serde(default, rename = "loop")]
    pub looping: bool,
    #[serde(default)]
    pub header: bool,
    #[serde(default)]
    pub start_offset: u64,
}

impl StreamConfig {
    /// Create a stream configuration with default options.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            looping: false,
            header: false,
            start_offset: 0,
        }
    }

    /// Set the options from a `StreamOptions` value.
    pub fn with_options(mut self, options: StreamOptions) -> Self {
        self.looping = options.looping;
        self.header = options.has_header;
        self.start_offset = options.start_offset;
        self
    }

    /// The open options described by this configuration.
    pub fn options(&self) -> StreamOptions {
        StreamOptions::new()
            .with_loop(self.looping)
            .with_header(self.header)
            .with_start_offset(self.start_offset)
    }
}

impl ReplayConfig {
    /// Create a new empty replay configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stream configuration.
    pub fn add_stream(mut self, stream: StreamConfig) -> Self {
        self.streams.push(stream);
        self
    }

    /// Set the re-open policy.
    pub fn with_reopen_policy(mut self, policy: impl Into<String>) -> Self {
        self.reopen_policy = Some(policy.into());
        self
    }

    /// Set the error policy.
    pub fn with_error_policy(mut self, policy: impl Into<String>) -> Self {
        self.error_policy = Some(policy.into());
        self
    }

    /// Parse a configuration from YAML.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, FormatError> {
        serde_yaml::from_str(s).map_err(|e| FormatError::Serde(Box::new(e)))
    }

    /// Parse a configuration from JSON.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, FormatError> {
        serde_json::from_str(s).map_err(|e| FormatError::Serde(Box::new(e)))
    }
}
