//! Registry of open streams keyed by their open configuration.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::{ReopenPolicy, StreamKey, StreamOptions};
use crate::error::StreamError;
use crate::io::{FileInput, InputProvider};
use crate::stream::FileStream;

/// Concurrency-safe map from `StreamKey` to open streams.
///
/// The registry lock only guards the map. Opening a file, reading its header
/// and seeking to the start offset all happen before the lock is taken, and
/// reads on a stream never touch the registry.
#[derive(Debug, Default)]
pub struct StreamRegistry {
    streams: Mutex<HashMap<StreamKey, Arc<FileStream>>>,
    reopen_policy: ReopenPolicy,
}

impl StreamRegistry {
    /// Create an empty registry that replaces streams on re-open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given re-open policy.
    pub fn with_reopen_policy(policy: ReopenPolicy) -> Self {
        Self {
            streams: Mutex::default(),
            reopen_policy: policy,
        }
    }

    /// Get the re-open policy.
    pub fn reopen_policy(&self) -> ReopenPolicy {
        self.reopen_policy
    }

    /// Open a local file and register it.
    pub fn open(
        &self,
        path: impl AsRef<Path>,
        options: StreamOptions,
    ) -> Result<StreamKey, StreamError> {
        let path = path.as_ref();
        // keyed by the path itself so non-UTF-8 names stay distinct
        self.open_keyed(StreamKey::new(path, options), &FileInput::new(path))
    }

    /// Open a local file with default options.
    pub fn open_path(&self, path: impl AsRef<Path>) -> Result<StreamKey, StreamError> {
        self.open(path, StreamOptions::default())
    }

    /// Open any input provider and register it under `provider.id()`.
    pub fn open_input(
        &self,
        input: &dyn InputProvider,
        options: StreamOptions,
    ) -> Result<StreamKey, StreamError> {
        self.open_keyed(StreamKey::new(input.id(), options), input)
    }

    fn open_keyed(
        &self,
        key: StreamKey,
        input: &dyn InputProvider,
    ) -> Result<StreamKey, StreamError> {
        if self.reopen_policy == ReopenPolicy::Reject && self.contains(&key) {
            return Err(StreamError::AlreadyOpen(key));
        }

        let stream = Arc::new(FileStream::open(key.clone(), input)?);

        let superseded = {
            let mut streams = self.lock();
            if self.reopen_policy == ReopenPolicy::Reject && streams.contains_key(&key) {
                return Err(StreamError::AlreadyOpen(key));
            }
            streams.insert(key.clone(), stream)
        };

        if let Some(old) = superseded {
            tracing::warn!(stream = %key, "re-open replaced a registered stream");
            // the caller may have closed it already
            let _ = old.close();
        }

        tracing::debug!(stream = %key, "opened stream");
        Ok(key)
    }

    /// Look up a stream. Never opens anything.
    pub fn get(&self, key: &StreamKey) -> Option<Arc<FileStream>> {
        self.lock().get(key).cloned()
    }

    /// Check if a key is registered.
    pub fn contains(&self, key: &StreamKey) -> bool {
        self.lock().contains_key(key)
    }

    /// Remove a stream and close it.
    ///
    /// Returns `false` if the key was not registered.
    pub fn close(&self, key: &StreamKey) -> bool {
        let removed = self.lock().remove(key);
        match removed {
            Some(stream) => {
                let _ = stream.close();
                true
            }
            None => false,
        }
    }

    /// Remove and close every stream. Returns how many were removed.
    pub fn close_all(&self) -> usize {
        let drained: Vec<_> = self.lock().drain().map(|(_, stream)| stream).collect();
        for stream in &drained {
            let _ = stream.close();
        }
        drained.len()
    }

    /// Keys of all registered streams, in no particular order.
    pub fn keys(&self) -> Vec<StreamKey> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StreamKey, Arc<FileStream>>> {
        self.streams.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
