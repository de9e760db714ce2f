//! Tests for stream options, keys and re-open policy.

use std::collections::HashSet;

use crate::config::{ReopenPolicy, StreamKey, StreamOptions};

#[test]
fn reopen_policy_from_str_parses_known_values() {
    assert_eq!(ReopenPolicy::from_str("replace"), Some(ReopenPolicy::Replace));
    assert_eq!(ReopenPolicy::from_str("REJECT"), Some(ReopenPolicy::Reject));
    assert_eq!(ReopenPolicy::from_str("error"), Some(ReopenPolicy::Reject));
    assert_eq!(ReopenPolicy::from_str("overwrite"), None);
    assert_eq!(ReopenPolicy::default(), ReopenPolicy::Replace);
}

#[test]
fn stream_options_builder_sets_fields() {
    let options = StreamOptions::new()
        .with_loop(true)
        .with_header(true)
        .with_start_offset(42);

    assert!(options.looping);
    assert!(options.has_header);
    assert_eq!(options.start_offset, 42);
    assert_eq!(StreamOptions::new(), StreamOptions::default());
}

#[test]
fn stream_keys_compare_structurally() {
    let a = StreamKey::new("data.csv", StreamOptions::new().with_loop(true));
    let b = StreamKey::new("data.csv", StreamOptions::new().with_loop(true));
    let c = StreamKey::new("data.csv", StreamOptions::new().with_header(true));

    assert_eq!(a, b);
    assert_ne!(a, c);

    let set: HashSet<_> = [a, b, c].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn stream_key_display_joins_path_and_options() {
    let key = StreamKey::new(
        "data/users.csv",
        StreamOptions::new().with_loop(true).with_start_offset(10),
    );

    assert_eq!(key.to_string(), "data/users.csv/true/false/10");
}
