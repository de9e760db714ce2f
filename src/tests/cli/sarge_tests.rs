use sarge::ArgumentType;

use crate::format::RecordFormat;

#[test]
fn record_format_parses_from_argument() {
    let csv = <RecordFormat as ArgumentType>::from_value(Some(" csv "))
        .expect("some")
        .expect("ok");
    assert_eq!(csv, RecordFormat::Csv);

    let bad = <RecordFormat as ArgumentType>::from_value(Some("xml")).expect("some");
    assert!(bad.is_err());

    assert!(<RecordFormat as ArgumentType>::from_value(None).is_none());
    assert_eq!(
        <RecordFormat as ArgumentType>::default_value(),
        Some(RecordFormat::Line)
    );
}
