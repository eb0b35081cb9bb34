//! Configuration loading and validation

use rbac_gateway::{Config, GatewayError};
use std::io::Write;
use tempfile::NamedTempFile;

const SECRET: &str = "0123456789abcdef0123456789abcdef-test";

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
server:
  host: 127.0.0.1
  port: 9000
auth:
  jwt_secret: "{SECRET}"
  access_token_ttl: 900
  refresh_token_ttl: 86400
  rbac:
    development_mode: false
    bootstrap_admin:
      email: admin@example.com
      password: correct-horse
reports:
  default_page_size: 25
  max_page_size: 100
logging:
  level: debug
  json: true
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.server().address(), "127.0.0.1:9000");
    assert_eq!(config.auth().access_token_ttl, 900);
    assert_eq!(config.reports().page_size(None), 25);
    assert_eq!(config.reports().page_size(Some(1_000)), 100);
    assert!(config.logging().json);

    let admin = config.rbac().bootstrap_admin.as_ref().unwrap();
    assert_eq!(admin.email, "admin@example.com");
    assert!(!format!("{:?}", admin).contains("correct-horse"));
}

#[tokio::test]
async fn test_missing_file_is_config_error() {
    let err = Config::from_file("/nonexistent/gateway.yaml").await.unwrap_err();
    assert!(matches!(err, GatewayError::Config(_)));
}

#[test]
fn test_empty_document_uses_defaults() {
    let config = Config::from_yaml("{}").unwrap();
    assert!(!config.rbac().development_mode);
    assert!(config.rbac().seed_defaults);
    assert!(config.auth().jwt_secret.len() >= 32);
}

#[test]
fn test_rejects_short_secret() {
    let err = Config::from_yaml("auth:\n  jwt_secret: short\n").unwrap_err();
    assert!(err.to_string().contains("JWT secret"));
}

#[test]
fn test_rejects_refresh_shorter_than_access() {
    let yaml = format!(
        "auth:\n  jwt_secret: \"{SECRET}\"\n  access_token_ttl: 3600\n  refresh_token_ttl: 600\n"
    );
    assert!(matches!(Config::from_yaml(&yaml), Err(GatewayError::Config(_))));
}

#[test]
fn test_rejects_weak_bootstrap_password() {
    let yaml = format!(
        "auth:\n  jwt_secret: \"{SECRET}\"\n  rbac:\n    bootstrap_admin:\n      email: admin@example.com\n      password: short\n"
    );
    let err = Config::from_yaml(&yaml).unwrap_err();
    assert!(err.to_string().contains("Bootstrap admin password"));
}

#[test]
fn test_yaml_round_trip_keeps_development_flag() {
    let yaml = format!("auth:\n  jwt_secret: \"{SECRET}\"\n  rbac:\n    development_mode: true\n");
    let config = Config::from_yaml(&yaml).unwrap();
    let reparsed = Config::from_yaml(&config.to_yaml().unwrap()).unwrap();

    assert!(reparsed.rbac().development_mode);
    assert_eq!(reparsed.auth().jwt_secret, SECRET);
}
