use super::open_mem;
use crate::config::StreamOptions;
use crate::error::StreamError;

#[test]
fn reads_after_close_fail_with_closed() {
    let stream = open_mem("a\n", StreamOptions::new());
    stream.close().unwrap();

    assert!(stream.is_closed());
    assert!(matches!(stream.read_line(), Err(StreamError::Closed)));
    assert!(matches!(stream.read_csv_record(), Err(StreamError::Closed)));
    assert!(matches!(stream.position(), Err(StreamError::Closed)));
}

#[test]
fn second_close_fails_cleanly() {
    let stream = open_mem("a\n", StreamOptions::new());

    assert!(stream.close().is_ok());
    assert!(matches!(stream.close(), Err(StreamError::Closed)));
}

#[test]
fn headers_survive_close() {
    let stream = open_mem("h1,h2\n", StreamOptions::new().with_header(true));
    stream.close().unwrap();

    assert_eq!(stream.headers(), ["h1".to_string(), "h2".to_string()]);
}

#[test]
fn closed_stream_iterators_yield_one_error() {
    let stream = open_mem("a\n", StreamOptions::new());
    stream.close().unwrap();

    let results: Vec<_> = stream.lines().collect();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(StreamError::Closed)));
}

#[test]
fn key_and_flags_reflect_options() {
    let options = StreamOptions::new().with_loop(true).with_header(false);
    let stream = open_mem("a\n", options);

    assert!(stream.is_looping());
    assert!(!stream.is_closed());
    assert_eq!(stream.key().options(), options);
    assert_eq!(stream.key().path(), std::path::Path::new("mem"));
}
