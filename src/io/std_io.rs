//! Local file input.

use std::io;
use std::path::PathBuf;

use super::{InputProvider, ReadSeek};

/// Input provider for reading from files.
#[derive(Debug, Clone)]
pub struct FileInput {
    id: String,
    path: PathBuf,
}

impl FileInput {
    /// Create a new file input provider.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn ReadSeek>> {
        let file = std::fs::File::open(&self.path)?;
        Ok(Box::new(file))
    }
}
