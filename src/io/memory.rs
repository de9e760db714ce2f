//! In-memory input for testing.

use std::io::{self, Cursor};
use std::sync::Arc;

use super::{InputProvider, ReadSeek};

/// In-memory input source for testing.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<Vec<u8>>,
}

impl InMemorySource {
    /// Create a new in-memory source with the given data.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: Arc::new(data),
        }
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn ReadSeek>> {
        Ok(Box::new(Cursor::new(self.data.as_ref().clone())))
    }
}
