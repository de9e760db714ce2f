//! Buffered record cursor shared by line and CSV reads.

use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom};

use crate::error::StreamError;
use crate::format::{self, FormatError, QuoteState};

/// A single buffered cursor over a seekable source.
///
/// Both read interpretations pull from the same buffer, so a line read followed
/// by a CSV read continues exactly where the line read stopped. The absolute
/// byte position of the next read is tracked explicitly.
#[derive(Debug)]
pub struct RecordCursor<R> {
    inner: BufReader<R>,
    position: u64,
}

impl<R: Read + Seek> RecordCursor<R> {
    /// Wrap a source positioned at byte 0.
    pub fn new(inner: R) -> Self {
        Self {
            inner: BufReader::new(inner),
            position: 0,
        }
    }

    /// Absolute byte offset of the next read.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Seek to an absolute offset, discarding buffered bytes.
    pub fn reset(&mut self, offset: u64) -> io::Result<()> {
        self.position = self.inner.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    /// Seek to `offset`, then skip forward to the next line start unless
    /// `offset` already is one.
    ///
    /// Returns the offset the next read starts at.
    pub fn reset_to_line_start(&mut self, offset: u64) -> io::Result<u64> {
        if offset == 0 {
            self.reset(0)?;
            return Ok(0);
        }

        self.reset(offset - 1)?;
        let before = self.inner.fill_buf()?.first().copied();
        match before {
            Some(b'\n') => {
                self.inner.consume(1);
                self.position = offset;
            }
            Some(_) => {
                let mut partial = Vec::new();
                self.read_raw_line(&mut partial)?;
            }
            None => self.position = offset,
        }
        Ok(self.position)
    }

    /// Read the next line, terminator stripped. `None` at end-of-input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.read_raw_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(format::decode_line(&buf)))
    }

    /// Read the next CSV record. `None` at end-of-input.
    ///
    /// Blank lines between records are skipped. A quoted field may span lines.
    pub fn next_csv_record(&mut self) -> Result<Option<Vec<String>>, StreamError> {
        let mut record = Vec::new();
        let mut state = QuoteState::FieldStart;
        let mut start = self.position;
        let mut line = Vec::new();

        loop {
            line.clear();
            if self.read_raw_line(&mut line)? == 0 {
                if record.is_empty() {
                    return Ok(None);
                }
                // only an open quoted field keeps a record going past a line
                return Err(malformed(start, FormatError::UnterminatedQuote));
            }

            let content = format::trim_line_terminator(&line);
            if record.is_empty() && content.is_empty() {
                start = self.position;
                continue;
            }

            state = format::scan_quotes(content, state);
            record.extend_from_slice(&line);
            if !state.is_open() {
                break;
            }
        }

        let record = format::trim_line_terminator(&record);
        format::parse_csv_record(record)
            .map(Some)
            .map_err(|e| malformed(start, e))
    }

    fn read_raw_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        let before = buf.len();
        let result = self.inner.read_until(b'\n', buf);
        // bytes consumed before a failure are already appended to `buf`
        self.position += (buf.len() - before) as u64;
        result
    }
}

fn malformed(offset: u64, error: FormatError) -> StreamError {
    StreamError::MalformedCsv {
        offset,
        message: error.to_string(),
    }
}
