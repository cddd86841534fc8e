use super::{apply_env, apply_file, load_settings, validate_server_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::PathBuf,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
server_url = "http://desk.internal:8080"
labels_path = "labels_acme.json"
request_timeout_secs = 30
"#,
    )
    .expect("parse");

    assert_eq!(settings.server_url, "http://desk.internal:8080");
    assert_eq!(settings.labels_path, Some(PathBuf::from("labels_acme.json")));
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(30)));
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[
            ("DESK_SERVER_URL", "http://legacy:5001"),
            ("APP__SERVER_URL", "http://preferred:5001"),
        ]),
    );
    assert_eq!(settings.server_url, "http://preferred:5001");
}

#[test]
fn unparsable_timeout_is_ignored() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn zero_timeout_means_no_timeout() {
    let settings = Settings {
        request_timeout_secs: Some(0),
        ..Settings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn mistyped_file_value_leaves_settings_untouched() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "server_url = 5").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("console_missing_{suffix}.toml"));
    assert!(load_settings(Some(path)).is_err());
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("console_config_{suffix}.toml"));
    fs::write(&path, "request_timeout_secs = 12\n").expect("write config");

    let settings = load_settings(Some(path.clone())).expect("load");
    assert_eq!(settings.request_timeout_secs, Some(12));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn validates_server_url_scheme() {
    assert!(validate_server_url("http://127.0.0.1:5001").is_ok());
    assert!(validate_server_url("file:///etc/passwd").is_err());
    assert!(validate_server_url("127.0.0.1:5001").is_err());
}
