//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`ApiConfig::base_url`]
pub const ENV_API_URL: &str = "ORDER_ADMIN_API_URL";

/// Environment variable overriding [`ApiConfig::token`]
pub const ENV_API_TOKEN: &str = "ORDER_ADMIN_API_TOKEN";

/// Connection settings for the REST API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Optional bearer token sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_string(),
            timeout_secs: 30,
            token: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Resource paths, relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Order resource (list and create)
    pub orders: String,

    /// Roles resource gating the create action
    pub roles: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            orders: "/order".to_string(),
            roles: "/user/roles".to_string(),
        }
    }
}

/// User-facing notice texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticesConfig {
    /// Shown after an order was created
    pub order_created: String,
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self {
            order_created: "Order created!".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Complete configuration for the order admin
///
/// Every section is optional in YAML; missing values fall back to defaults.
///
/// ```yaml
/// api:
///   base_url: https://shop.example.com/api
///   timeout_secs: 10
/// resources:
///   orders: /order
///   roles: /user/roles
/// notices:
///   order_created: "Pedido criado!"
/// logging:
///   filter: order_admin=debug
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub api: ApiConfig,
    pub resources: ResourcesConfig,
    pub notices: NoticesConfig,
    pub logging: LoggingConfig,
}

impl AdminConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `ORDER_ADMIN_API_URL` / `ORDER_ADMIN_API_TOKEN` overrides
    pub fn apply_env(self) -> Self {
        self.apply_overrides(
            std::env::var(ENV_API_URL).ok(),
            std::env::var(ENV_API_TOKEN).ok(),
        )
    }

    /// Apply explicit overrides; empty values are ignored
    pub fn apply_overrides(mut self, base_url: Option<String>, token: Option<String>) -> Self {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AdminConfig::from_yaml_str("").unwrap();
        assert_eq!(config, AdminConfig::default());
        assert_eq!(config.resources.orders, "/order");
        assert_eq!(config.notices.order_created, "Order created!");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
api:
  base_url: https://shop.example.com/api
notices:
  order_created: "Pedido criado!"
"#;
        let config = AdminConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.resources.roles, "/user/roles");
        assert_eq!(config.notices.order_created, "Pedido criado!");
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(AdminConfig::from_yaml_str("api: [1, 2").is_err());
    }

    #[test]
    fn test_overrides_replace_api_settings() {
        let config = AdminConfig::default().apply_overrides(
            Some("http://127.0.0.1:9000".to_string()),
            Some("secret".to_string()),
        );
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let config =
            AdminConfig::default().apply_overrides(Some("  ".to_string()), Some(String::new()));
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_timeout_has_a_floor() {
        let api = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.timeout(), Duration::from_secs(1));
    }
}
