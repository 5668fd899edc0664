use super::*;

use std::{collections::HashMap, fs};

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = Settings::default();
    assert_eq!(settings.backend_url, "http://127.0.0.1:8000");
    assert_eq!(settings.log_filter, "warn");
    assert_eq!(settings.format, OutputFormat::Text);
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
backend_url = "http://10.0.0.5:9000"
format = "html"
"#,
    )
    .expect("parse");
    assert_eq!(settings.backend_url, "http://10.0.0.5:9000");
    assert_eq!(settings.format, OutputFormat::Html);
    assert_eq!(settings.log_filter, "warn");
}

#[test]
fn malformed_file_is_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "format = \"pdf\"").is_err());
    assert!(apply_file(&mut settings, "backend_url = ").is_err());
}

#[test]
fn app_prefixed_env_wins_over_tool_prefixed_env() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env_of(&[
            ("CLAIMCHECK_BACKEND_URL", "http://a:1"),
            ("APP__BACKEND_URL", "http://b:2"),
            ("CLAIMCHECK_LOG", "debug"),
            ("APP__FORMAT", "HTML"),
        ]),
    );
    assert_eq!(settings.backend_url, "http://b:2");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.format, OutputFormat::Html);
}

#[test]
fn unparseable_env_format_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env_of(&[("APP__FORMAT", "yaml")]));
    assert_eq!(settings.format, OutputFormat::Text);
}

#[test]
fn cli_overrides_apply_last() {
    let settings = Settings::default().with_overrides(
        Some("https://checker.example.com".to_string()),
        Some(OutputFormat::Html),
    );
    assert_eq!(settings.backend_url, "https://checker.example.com");
    assert_eq!(settings.format, OutputFormat::Html);

    let unchanged = Settings::default().with_overrides(None, None);
    assert_eq!(unchanged, Settings::default());
}

#[test]
fn explicit_config_path_must_exist() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.toml");
    let err = load_settings_with_env(Some(missing.as_path()), env_of(&[])).expect_err("missing file");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn env_overrides_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("claimcheck.toml");
    fs::write(
        &path,
        "backend_url = \"http://file:1\"\nlog_filter = \"client_core=debug\"\n",
    )
    .expect("write");

    let settings = load_settings_with_env(Some(path.as_path()), env_of(&[])).expect("load");
    assert_eq!(settings.backend_url, "http://file:1");
    assert_eq!(settings.log_filter, "client_core=debug");

    let settings = load_settings_with_env(
        Some(path.as_path()),
        env_of(&[("APP__BACKEND_URL", "http://env:2")]),
    )
    .expect("load");
    assert_eq!(settings.backend_url, "http://env:2");
    assert_eq!(settings.log_filter, "client_core=debug");
}
