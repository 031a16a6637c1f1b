use sharecount_config::{FetchMode, ShareCountConfigLoader};
use sharecount_common::observability::LogFormat;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn loads_full_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "sharecount.yaml",
        r#"
version: "1"
fetch:
  mode: sequential
http:
  timeout_secs: 7
  user_agent: "sharecount-tests"
endpoints:
  pinterest: "http://localhost:1234/pins?url={url}"
logging:
  format: json
  stderr: true
  file: false
  filter: debug
"#,
    );

    let config = ShareCountConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load config");

    assert_eq!(config.version.as_deref(), Some("1"));
    assert_eq!(config.fetch.mode, FetchMode::Sequential);
    assert_eq!(config.http.timeout_secs, Some(7));
    assert_eq!(config.http.user_agent.as_deref(), Some("sharecount-tests"));
    assert_eq!(
        config.endpoints.get("pinterest"),
        Some("http://localhost:1234/pins?url={url}")
    );
    assert_eq!(config.endpoints.get("facebook"), None);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.logging.stderr);
    assert!(!config.logging.file);
    assert_eq!(config.logging.filter, "debug");
}

#[test]
#[serial]
fn missing_optional_file_yields_defaults() {
    let tmp = TempDir::new().unwrap();
    let config = ShareCountConfigLoader::new()
        .with_optional_file(tmp.path().join("absent.yaml"))
        .load()
        .expect("defaults");

    assert_eq!(config.fetch.mode, FetchMode::Concurrent);
    assert_eq!(
        config.http.headers.get("Connection").map(String::as_str),
        Some("close")
    );
}

#[test]
#[serial]
fn missing_required_file_fails() {
    let tmp = TempDir::new().unwrap();
    let result = ShareCountConfigLoader::new()
        .with_file(tmp.path().join("absent.yaml"))
        .load();
    assert!(result.is_err());
}

#[test]
#[serial]
fn environment_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let p = write_yaml(
        &tmp,
        "sharecount.yaml",
        "fetch:\n  mode: concurrent\nhttp:\n  timeout_secs: 30\n",
    );

    temp_env::with_vars(
        [
            ("SHARECOUNT__FETCH__MODE", Some("sequential")),
            ("SHARECOUNT__HTTP__TIMEOUT_SECS", Some("3")),
        ],
        || {
            let config = ShareCountConfigLoader::new()
                .with_file(&p)
                .load()
                .expect("load config");
            assert_eq!(config.fetch.mode, FetchMode::Sequential);
            assert_eq!(config.http.timeout_secs, Some(3));
        },
    );
}

#[test]
#[serial]
fn unknown_fetch_mode_is_rejected() {
    let result = ShareCountConfigLoader::new()
        .with_yaml_str("fetch:\n  mode: eventually\n")
        .load();
    assert!(result.is_err());
}
