//! A single open file stream with line and CSV read views.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;

use crate::config::StreamKey;
use crate::error::StreamError;
use crate::io::{InputProvider, ReadSeek, RecordCursor};

type Cursor = RecordCursor<Box<dyn ReadSeek>>;

/// An open file paired with a record cursor.
///
/// Every read, reset and close takes the stream's own lock, so reads on one
/// stream are serialized and a loop reset is atomic with the read that reached
/// end-of-input. Different streams never contend with each other.
///
/// When looping, the read that reaches end-of-input returns `Ok(None)` and
/// rewinds to byte 0; the following read starts the next cycle. The rewind goes
/// to the true file start, so a header row is read back as data on every cycle
/// after the first.
pub struct FileStream {
    key: StreamKey,
    looping: bool,
    header: Vec<String>,
    header_record: Option<csv::StringRecord>,
    cursor: Mutex<Option<Cursor>>,
}

impl FileStream {
    /// Open `input` with the options carried by `key`.
    ///
    /// Captures the header first (from byte 0), then moves to the start offset.
    pub fn open(key: StreamKey, input: &dyn InputProvider) -> Result<Self, StreamError> {
        let handle = input
            .open()
            .map_err(|e| StreamError::open(key.path(), e))?;
        let options = key.options();
        let mut cursor = RecordCursor::new(handle);

        let header = if options.has_header {
            cursor.next_csv_record()?.unwrap_or_default()
        } else {
            Vec::new()
        };

        if options.start_offset != 0 {
            let aligned = cursor.reset_to_line_start(options.start_offset)?;
            if aligned != options.start_offset {
                tracing::debug!(
                    stream = %key,
                    requested = options.start_offset,
                    aligned,
                    "start offset moved to next line start"
                );
            }
        }

        let header_record = options
            .has_header
            .then(|| csv::StringRecord::from(header.clone()));

        Ok(Self {
            looping: options.looping,
            header,
            header_record,
            cursor: Mutex::new(Some(cursor)),
            key,
        })
    }

    /// The key this stream was opened under.
    pub fn key(&self) -> &StreamKey {
        &self.key
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// The header captured at open; empty if header capture was off.
    pub fn headers(&self) -> &[String] {
        &self.header
    }

    /// Read the next line with its terminator stripped.
    ///
    /// Returns `Ok(None)` on the read that reaches end-of-input.
    pub fn read_line(&self) -> Result<Option<String>, StreamError> {
        let mut guard = self.lock();
        let cursor = guard.as_mut().ok_or(StreamError::Closed)?;
        match cursor.next_line()? {
            Some(line) => Ok(Some(line)),
            None => {
                self.wrap(cursor)?;
                Ok(None)
            }
        }
    }

    /// Read the next line as plain text for script callers.
    ///
    /// End-of-input yields an empty string and failures yield the error text,
    /// so the result cannot distinguish data from errors. Prefer `read_line`.
    pub fn read_line_text(&self) -> String {
        match self.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => String::new(),
            Err(e) => e.to_string(),
        }
    }

    /// Read the next CSV record as its fields.
    ///
    /// Returns `Ok(None)` on the read that reaches end-of-input. A malformed
    /// record is skipped over and reported as `StreamError::MalformedCsv`.
    pub fn read_csv_record(&self) -> Result<Option<Vec<String>>, StreamError> {
        let mut guard = self.lock();
        let cursor = guard.as_mut().ok_or(StreamError::Closed)?;
        match cursor.next_csv_record() {
            Ok(Some(fields)) => Ok(Some(fields)),
            Ok(None) => {
                self.wrap(cursor)?;
                Ok(None)
            }
            Err(e) => {
                if let StreamError::MalformedCsv { offset, .. } = &e {
                    tracing::warn!(stream = %self.key, offset, "malformed CSV record");
                }
                Err(e)
            }
        }
    }

    /// Read the next CSV record and deserialize it into `T`.
    ///
    /// Fields are matched by header name when a header was captured, and by
    /// position otherwise.
    pub fn read_csv_as<T: DeserializeOwned>(&self) -> Result<Option<T>, StreamError> {
        let Some(fields) = self.read_csv_record()? else {
            return Ok(None);
        };
        csv::StringRecord::from(fields)
            .deserialize(self.header_record.as_ref())
            .map(Some)
            .map_err(StreamError::Deserialize)
    }

    /// Iterate lines until the next end-of-input.
    pub fn lines(&self) -> Lines<'_> {
        Lines {
            stream: self,
            done: false,
        }
    }

    /// Iterate CSV records until the next end-of-input.
    pub fn records(&self) -> Records<'_> {
        Records {
            stream: self,
            done: false,
        }
    }

    /// Absolute byte offset the next read starts at.
    ///
    /// Reopening the same file with this value as `start_offset` resumes the
    /// replay at the same record.
    pub fn position(&self) -> Result<u64, StreamError> {
        self.lock()
            .as_ref()
            .map(|c| c.position())
            .ok_or(StreamError::Closed)
    }

    /// Release the file handle. Closing twice returns `StreamError::Closed`.
    pub fn close(&self) -> Result<(), StreamError> {
        match self.lock().take() {
            Some(_) => {
                tracing::debug!(stream = %self.key, "closed stream");
                Ok(())
            }
            None => Err(StreamError::Closed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.lock().is_none()
    }

    fn wrap(&self, cursor: &mut Cursor) -> Result<(), StreamError> {
        if self.looping {
            tracing::debug!(stream = %self.key, "end of input, rewinding to start");
            cursor.reset(0)?;
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, Option<Cursor>> {
        self.cursor.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for FileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStream")
            .field("key", &self.key)
            .field("looping", &self.looping)
            .field("header", &self.header)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Iterator over lines, ending at end-of-input.
///
/// On a looping stream a fresh iterator continues with the next cycle.
#[derive(Debug)]
pub struct Lines<'a> {
    stream: &'a FileStream,
    done: bool,
}

impl Iterator for Lines<'_> {
    type Item = Result<String, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stream.read_line() {
            Ok(Some(line)) => Some(Ok(line)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = matches!(e, StreamError::Closed);
                Some(Err(e))
            }
        }
    }
}

/// Iterator over CSV records, ending at end-of-input.
#[derive(Debug)]
pub struct Records<'a> {
    stream: &'a FileStream,
    done: bool,
}

impl Iterator for Records<'_> {
    type Item = Result<Vec<String>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.stream.read_csv_record() {
            Ok(Some(fields)) => Some(Ok(fields)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = matches!(e, StreamError::Closed);
                Some(Err(e))
            }
        }
    }
}
