use huddle_meetings::Config;

#[test]
fn test_defaults_when_no_file_is_present() {
    let cfg = Config::load("/nonexistent/path/huddle-meetings").unwrap();

    assert_eq!(cfg.service.name, "huddle-meetings");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 7710);
    assert_eq!(cfg.recording.channel_capacity, 256);
}

#[test]
fn test_file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huddle-meetings.toml");
    std::fs::write(
        &path,
        r#"
[service]
name = "huddle-dev"

[service.http]
port = 9000

[recording]
channel_capacity = 32
"#,
    )
    .unwrap();

    let base = dir.path().join("huddle-meetings");
    let cfg = Config::load(base.to_str().unwrap()).unwrap();

    assert_eq!(cfg.service.name, "huddle-dev");
    // Unset keys keep their defaults.
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 9000);
    assert_eq!(cfg.recording.channel_capacity, 32);
}
