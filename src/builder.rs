//! Builder for opening a set of configured streams together.

use std::collections::HashSet;

use crate::config::{ReopenPolicy, ReplayConfig, StreamConfig, StreamKey, StreamOptions};
use crate::error::{AggregateError, ErrorPolicy, SingleIoError, Stage};
use crate::registry::StreamRegistry;

/// Config ids mapped to the keys their streams were registered under.
#[derive(Debug, Clone, Default)]
pub struct ReplaySet {
    entries: Vec<(String, StreamKey)>,
}

impl ReplaySet {
    /// Get the key of a configured stream.
    pub fn get(&self, id: &str) -> Option<&StreamKey> {
        self.entries.iter().find(|(i, _)| i == id).map(|(_, k)| k)
    }

    /// Iterate `(id, key)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StreamKey)> {
        self.entries.iter().map(|(i, k)| (i.as_str(), k))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Opens a configured set of streams into a registry.
pub struct ReplayBuilder {
    streams: Vec<StreamConfig>,
    error_policy: ErrorPolicy,
    reopen_policy: ReopenPolicy,
}

impl Default for ReplayBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayBuilder {
    /// Create an empty builder: accumulate errors, replace on re-open.
    pub fn new() -> Self {
        Self {
            streams: Vec::new(),
            error_policy: ErrorPolicy::Accumulate,
            reopen_policy: ReopenPolicy::Replace,
        }
    }

    /// Add a stream by id, path and open options.
    pub fn add_stream(
        mut self,
        id: impl Into<String>,
        path: impl Into<String>,
        options: StreamOptions,
    ) -> Self {
        self.streams
            .push(StreamConfig::new(id, path).with_options(options));
        self
    }

    /// Add a stream from its config entry.
    pub fn add_stream_config(mut self, config: StreamConfig) -> Self {
        self.streams.push(config);
        self
    }

    /// Set the error policy for setup failures.
    pub fn with_mode(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    /// Set the re-open policy of the registry `build` creates.
    pub fn with_reopen_policy(mut self, policy: ReopenPolicy) -> Self {
        self.reopen_policy = policy;
        self
    }

    /// Create a builder from a replay config, validating policies and ids.
    pub fn from_replay_config(config: ReplayConfig) -> Result<Self, AggregateError> {
        let mut builder = ReplayBuilder::new();
        let mut errors = Vec::new();

        if let Some(policy_str) = config.error_policy.as_deref() {
            match ErrorPolicy::from_str(policy_str) {
                Some(policy) => builder = builder.with_mode(policy),
                None => errors.push(SingleIoError::config(
                    "error_policy",
                    format!("unknown error policy: {policy_str}"),
                )),
            }
        }

        if let Some(policy_str) = config.reopen_policy.as_deref() {
            match ReopenPolicy::from_str(policy_str) {
                Some(policy) => builder = builder.with_reopen_policy(policy),
                None => errors.push(SingleIoError::config(
                    "reopen_policy",
                    format!("unknown reopen policy: {policy_str}"),
                )),
            }
        }

        let mut seen = HashSet::new();
        for stream in config.streams {
            if !seen.insert(stream.id.clone()) {
                errors.push(SingleIoError::config(
                    stream.id.clone(),
                    "duplicate stream id",
                ));
                continue;
            }
            builder.streams.push(stream);
        }

        if !errors.is_empty() {
            if matches!(builder.error_policy, ErrorPolicy::FastFail) {
                errors.truncate(1);
            }
            return Err(AggregateError { errors });
        }

        Ok(builder)
    }

    /// Open every configured stream into a new registry.
    pub fn build(self) -> Result<(StreamRegistry, ReplaySet), AggregateError> {
        let registry = StreamRegistry::with_reopen_policy(self.reopen_policy);
        let set = self.open_into(&registry)?;
        Ok((registry, set))
    }

    /// Open every configured stream into an existing registry.
    ///
    /// Streams opened before a failure stay registered.
    pub fn open_into(&self, registry: &StreamRegistry) -> Result<ReplaySet, AggregateError> {
        let mut set = ReplaySet::default();
        let mut errors = Vec::new();

        for stream in &self.streams {
            match registry.open(&stream.path, stream.options()) {
                Ok(key) => set.entries.push((stream.id.clone(), key)),
                Err(e) => {
                    errors.push(SingleIoError {
                        stage: Stage::Open,
                        target: stream.id.clone(),
                        error: Box::new(e),
                    });
                    if matches!(self.error_policy, ErrorPolicy::FastFail) {
                        return Err(AggregateError { errors });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(set)
        } else {
            Err(AggregateError { errors })
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.error_policy
    }

    pub fn reopen_policy(&self) -> ReopenPolicy {
        self.reopen_policy
    }

    pub fn streams(&self) -> &[StreamConfig] {
        &self.streams
    }
}
