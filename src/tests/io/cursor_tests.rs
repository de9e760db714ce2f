use std::io::{Cursor, Read, Seek};

use crate::error::StreamError;
use crate::io::RecordCursor;

fn cursor(data: &str) -> RecordCursor<Cursor<Vec<u8>>> {
    RecordCursor::new(Cursor::new(data.as_bytes().to_vec()))
}

#[test]
fn next_line_strips_terminators_and_tracks_position() {
    let mut c = cursor("a\r\nbb\nccc");

    assert_eq!(c.next_line().unwrap().as_deref(), Some("a"));
    assert_eq!(c.position(), 3);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("bb"));
    assert_eq!(c.position(), 6);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("ccc"));
    assert_eq!(c.position(), 9);
    assert_eq!(c.next_line().unwrap(), None);
    assert_eq!(c.next_line().unwrap(), None);
}

#[test]
fn next_line_keeps_empty_lines() {
    let mut c = cursor("a\n\nb\n");

    assert_eq!(c.next_line().unwrap().as_deref(), Some("a"));
    assert_eq!(c.next_line().unwrap().as_deref(), Some(""));
    assert_eq!(c.next_line().unwrap().as_deref(), Some("b"));
    assert_eq!(c.next_line().unwrap(), None);
}

#[test]
fn next_csv_record_joins_lines_inside_quotes() {
    let mut c = cursor("id,note\n1,\"line one\nline two\"\n2,plain\n");

    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["id".into(), "note".into()]));
    assert_eq!(
        c.next_csv_record().unwrap(),
        Some(vec!["1".into(), "line one\nline two".into()])
    );
    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["2".into(), "plain".into()]));
    assert_eq!(c.next_csv_record().unwrap(), None);
}

#[test]
fn next_csv_record_skips_blank_lines() {
    let mut c = cursor("a,b\n\n\r\nc,d\n\n");

    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["a".into(), "b".into()]));
    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["c".into(), "d".into()]));
    assert_eq!(c.next_csv_record().unwrap(), None);
}

#[test]
fn next_csv_record_handles_crlf_records() {
    let mut c = cursor("a,b\r\nc,d\r\n");

    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["a".into(), "b".into()]));
    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["c".into(), "d".into()]));
}

#[test]
fn next_csv_record_reports_unterminated_quote_with_offset() {
    let mut c = cursor("a,b\nc,\"open\nstill open\n");

    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["a".into(), "b".into()]));
    let err = c.next_csv_record().expect_err("unterminated quote");
    match err {
        StreamError::MalformedCsv { offset, message } => {
            assert_eq!(offset, 4);
            assert!(message.contains("unterminated"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(c.next_csv_record().unwrap(), None);
}

#[test]
fn line_and_csv_reads_share_one_position() {
    let mut c = cursor("title\n1,2\nlast\n");

    assert_eq!(c.next_line().unwrap().as_deref(), Some("title"));
    assert_eq!(c.next_csv_record().unwrap(), Some(vec!["1".into(), "2".into()]));
    assert_eq!(c.next_line().unwrap().as_deref(), Some("last"));
}

#[test]
fn reset_rewinds_to_offset() {
    let mut c = cursor("a\nb\n");

    assert_eq!(c.next_line().unwrap().as_deref(), Some("a"));
    assert_eq!(c.next_line().unwrap().as_deref(), Some("b"));
    c.reset(0).unwrap();
    assert_eq!(c.position(), 0);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("a"));
}

#[test]
fn reset_to_line_start_keeps_offset_at_line_start() {
    let mut c = cursor("alpha\nbeta\ngamma\n");

    assert_eq!(c.reset_to_line_start(6).unwrap(), 6);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("beta"));
}

#[test]
fn reset_to_line_start_skips_partial_line() {
    let mut c = cursor("alpha\nbeta\ngamma\n");

    assert_eq!(c.reset_to_line_start(3).unwrap(), 6);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("beta"));

    // offset pointing at a newline byte still belongs to the previous line
    assert_eq!(c.reset_to_line_start(5).unwrap(), 6);
    assert_eq!(c.next_line().unwrap().as_deref(), Some("beta"));
}

#[test]
fn reset_to_line_start_past_end_is_end_of_input() {
    let mut c = cursor("alpha\n");

    assert_eq!(c.reset_to_line_start(100).unwrap(), 100);
    assert_eq!(c.next_line().unwrap(), None);
}

/// Serves its bytes, then fails instead of reporting end-of-input.
struct FailingTail(Cursor<Vec<u8>>);

impl Read for FailingTail {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self.0.read(buf)? {
            0 => Err(std::io::Error::other("device went away")),
            n => Ok(n),
        }
    }
}

impl Seek for FailingTail {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        self.0.seek(pos)
    }
}

#[test]
fn position_counts_bytes_consumed_before_a_read_error() {
    let mut c = RecordCursor::new(FailingTail(Cursor::new(b"ok\npartial".to_vec())));

    assert_eq!(c.next_line().unwrap().as_deref(), Some("ok"));
    assert_eq!(c.position(), 3);

    let err = c.next_line().expect_err("source fails mid-line");
    assert_eq!(err.kind(), std::io::ErrorKind::Other);
    assert_eq!(c.position(), 10);

    c.reset(3).unwrap();
    assert_eq!(c.position(), 3);
}
