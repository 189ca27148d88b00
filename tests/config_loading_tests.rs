//! Integration tests for loading the admin configuration from disk

use std::io::Write;
use tempfile::NamedTempFile;

use order_admin::prelude::*;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
api:
  base_url: https://shop.example.com/api
  timeout_secs: 10
  token: abc123
resources:
  orders: /v2/order
  roles: /v2/me/roles
notices:
  order_created: "Pedido criado!"
logging:
  filter: order_admin=debug
"#,
    );

    let config = AdminConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.api.base_url, "https://shop.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.token.as_deref(), Some("abc123"));
    assert_eq!(config.resources.orders, "/v2/order");
    assert_eq!(config.resources.roles, "/v2/me/roles");
    assert_eq!(config.notices.order_created, "Pedido criado!");
    assert_eq!(config.logging.filter, "order_admin=debug");
}

#[test]
fn test_empty_file_is_default() {
    let file = write_config("\n");

    let config = AdminConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config, AdminConfig::default());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let path = path.to_str().unwrap();

    let err = AdminConfig::from_yaml_file(path).unwrap_err();

    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn test_malformed_file_reports_path_and_cause() {
    let file = write_config("api:\n  timeout_secs: soon\n");
    let path = file.path().to_str().unwrap().to_string();

    let err = AdminConfig::from_yaml_file(&path).unwrap_err();

    assert!(err.to_string().contains("Invalid config file"));
    assert!(err.to_string().contains(&path));
    assert!(err.chain().count() >= 2);
}

#[test]
fn test_overrides_win_over_file() {
    let file = write_config("api:\n  base_url: https://from-file.example.com\n");

    let config = AdminConfig::from_yaml_file(file.path().to_str().unwrap())
        .unwrap()
        .apply_overrides(Some("http://127.0.0.1:4000".to_string()), None);

    assert_eq!(config.api.base_url, "http://127.0.0.1:4000");
    assert!(config.api.token.is_none());
}

#[test]
fn test_configured_resources_reach_the_services() {
    let file = write_config("resources:\n  orders: /v2/order\n  roles: /v2/me/roles\n");
    let config = AdminConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let app = AdminApp::from_config(&config).unwrap();

    assert_eq!(app.orders().resource(), "/v2/order");
    assert!(format!("{:?}", app.users()).contains("/v2/me/roles"));
}
