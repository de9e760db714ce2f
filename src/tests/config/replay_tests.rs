//! Tests for ReplayConfig parsing and helpers.

use crate::config::{ReplayConfig, StreamConfig, StreamOptions};

#[test]
fn stream_config_options_round_trip() {
    let options = StreamOptions::new().with_header(true).with_start_offset(3);
    let config = StreamConfig::new("users", "users.csv").with_options(options);

    assert_eq!(config.options(), options);
    assert!(!config.looping);
}

#[test]
fn replay_config_builder_collects_streams() {
    let config = ReplayConfig::new()
        .add_stream(StreamConfig::new("a", "a.txt"))
        .add_stream(StreamConfig::new("b", "b.csv"))
        .with_reopen_policy("reject")
        .with_error_policy("fast_fail");

    assert_eq!(config.streams.len(), 2);
    assert_eq!(config.reopen_policy.as_deref(), Some("reject"));
    assert_eq!(config.error_policy.as_deref(), Some("fast_fail"));
}

#[cfg(feature = "json")]
#[test]
fn parse_json_replay_config_with_defaults() {
    let json = r#"{
        "streams": [
            { "id": "users", "path": "users.csv", "loop": true, "header": true },
            { "id": "log", "path": "access.log", "start_offset": 128 }
        ]
    }"#;

    let config = ReplayConfig::from_json_str(json).expect("valid config");
    assert_eq!(config.streams.len(), 2);
    assert_eq!(
        config.streams[0].options(),
        StreamOptions::new().with_loop(true).with_header(true)
    );
    assert_eq!(
        config.streams[1].options(),
        StreamOptions::new().with_start_offset(128)
    );
    assert!(config.reopen_policy.is_none());
}

#[cfg(feature = "json")]
#[test]
fn parse_json_replay_config_rejects_missing_path() {
    let json = r#"{ "streams": [ { "id": "users" } ] }"#;
    assert!(ReplayConfig::from_json_str(json).is_err());
}

#[cfg(feature = "yaml")]
#[test]
fn parse_yaml_replay_config() {
    let yaml = r#"
reopen_policy: reject
error_policy: accumulate
streams:
  - id: users
    path: data/users.csv
    loop: true
    header: true
"#;

    let config = ReplayConfig::from_yaml_str(yaml).expect("valid config");
    assert_eq!(config.reopen_policy.as_deref(), Some("reject"));
    assert_eq!(config.streams[0].id, "users");
    assert!(config.streams[0].looping);
    assert_eq!(config.streams[0].start_offset, 0);
}
