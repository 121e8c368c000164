//! Configuration tests
//!
//! The generated template must always parse back into the same values,
//! otherwise `config --reset` would hand users a broken file.

use super::*;

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let merged = Config::merge(parsed.unwrap(), EnvOverrides::default());
    assert_eq!(merged.backend_url, config.backend_url);
    assert_eq!(merged.request_timeout_secs, config.request_timeout_secs);
    assert_eq!(merged.datasource, config.datasource);
    assert_eq!(merged.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_config_roundtrip_custom_datasource() {
    let mut config = Config::default();
    config.datasource = DataSourceConfig {
        id: 42,
        name: "sales \"eu\"".to_string(),
        columns: vec!["country".into(), "state/province".into()],
        supports_lookup: false,
    };
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let merged = Config::merge(file, EnvOverrides::default());

    assert_eq!(merged.datasource, config.datasource);
    assert_eq!(merged.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
backend_url = "http://file.example"
request_timeout_secs = 5

[datasource]
id = 3
"#,
    )
    .unwrap();
    let env = EnvOverrides {
        backend_url: Some("http://env.example".into()),
        request_timeout_secs: Some("9".into()),
        datasource_id: Some("11".into()),
        ..Default::default()
    };

    let config = Config::merge(file, env);

    assert_eq!(config.backend_url, "http://env.example");
    assert_eq!(config.request_timeout_secs, 9);
    assert_eq!(config.datasource.id, 11);
}

#[test]
fn test_bad_env_number_falls_back_to_file() {
    let file: FileConfig = toml::from_str("request_timeout_secs = 5").unwrap();
    let env = EnvOverrides {
        request_timeout_secs: Some("soon".into()),
        datasource_id: Some("abc".into()),
        ..Default::default()
    };

    let config = Config::merge(file, env);

    assert_eq!(config.request_timeout_secs, 5);
    assert_eq!(config.datasource.id, DataSourceConfig::default().id);
}

#[test]
fn test_zero_timeout_disables_timeout() {
    let file: FileConfig = toml::from_str("request_timeout_secs = 5").unwrap();
    let env = EnvOverrides {
        request_timeout_secs: Some("0".into()),
        ..Default::default()
    };

    let config = Config::merge(file, env);

    assert_eq!(config.request_timeout_secs, 0);
    assert_eq!(config.request_timeout(), None);
    assert!(config.to_toml().contains("0 disables the timeout"));
}

#[test]
fn test_default_timeout_is_applied() {
    let config = Config::default();
    assert_eq!(
        config.request_timeout(),
        Some(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    );
}

#[test]
fn test_partial_sections_keep_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
[datasource]
columns = ["country"]

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let config = Config::merge(file, EnvOverrides::default());

    assert_eq!(config.datasource.columns, vec!["country".to_string()]);
    assert!(config.datasource.supports_lookup);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file_prefix, "mapctl");
}

#[test]
fn test_runtime_flags() {
    let flags = |no_tui: Option<&str>, demo: Option<&str>| {
        Config::merge(
            FileConfig::default(),
            EnvOverrides {
                no_tui: no_tui.map(String::from),
                demo: demo.map(String::from),
                ..Default::default()
            },
        )
    };

    let defaults = flags(None, None);
    assert!(defaults.enable_tui);
    assert!(!defaults.demo_mode);

    let headless = flags(Some("TRUE"), Some("1"));
    assert!(!headless.enable_tui);
    assert!(headless.demo_mode);

    let explicit_off = flags(Some("0"), Some("no"));
    assert!(explicit_off.enable_tui);
    assert!(!explicit_off.demo_mode);
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_datasource_config_to_data_source() {
    let ds = DataSourceConfig {
        id: 8,
        name: "events".into(),
        columns: vec!["kind".into()],
        supports_lookup: false,
    }
    .to_data_source();

    assert_eq!(ds.id, 8);
    assert_eq!(ds.columns, vec!["kind".to_string()]);
    assert!(!ds.supports_lookup);
}
