//! Loading configuration files through the facade and serving with them.

use std::io::Write;

use abacus::ConfigSource;
use abacus_test::TestClient;
use http::StatusCode;
use serde_json::json;
use tempfile::NamedTempFile;

fn config_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn explicit_toml_file_is_loaded() {
    let file = config_file(
        ".toml",
        r#"
        [server]
        http_addr = "127.0.0.1:9100"
        max_body_bytes = 2048

        [docs]
        enabled = false
        "#,
    );

    let config = abacus::load_config(&ConfigSource::Explicit(file.path().to_path_buf())).unwrap();
    assert_eq!(config.server.http_addr, "127.0.0.1:9100");
    assert_eq!(config.server.max_body_bytes, 2048);
    assert!(!config.docs.enabled);
    assert_eq!(config.server.service_name, "abacus");
}

#[test]
fn missing_default_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let source = ConfigSource::Default(dir.path().join("abacus.toml"));
    let config = abacus::load_config(&source).unwrap();
    assert_eq!(config.server.max_body_bytes, 1024 * 1024);
    assert!(config.docs.enabled);
}

#[test]
fn invalid_values_are_rejected() {
    let file = config_file(".json", r#"{"server": {"request_timeout_ms": 0}}"#);
    let result = abacus::load_config(&ConfigSource::Explicit(file.path().to_path_buf()));
    assert!(result.is_err());
}

#[tokio::test]
async fn file_settings_reach_the_service() {
    let file = config_file(
        ".toml",
        r#"
        [server]
        service_name = "from-file"

        [docs]
        enabled = false
        "#,
    );
    let config = abacus::load_config(&ConfigSource::Explicit(file.path().to_path_buf())).unwrap();
    let client = TestClient::new(abacus::build_service(&config).unwrap());

    let health = client.get("/health").send().await;
    assert_eq!(health.json_value().unwrap()["service"], "from-file");
    client
        .get("/docs")
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
    client
        .post_json("/divide", &json!({"a": 9, "b": 3}))
        .await
        .assert_body_eq(r#"{"result":3.0}"#);
}
