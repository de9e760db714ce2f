//! Internal tests, grouped by module.

mod config;
mod registry;

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `contents` to a fresh temp file that lives as long as the handle.
pub(crate) fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}
