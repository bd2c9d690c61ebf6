//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the application.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Front controller settings (debug flag, login fallback).
    pub app: ApplicationConfig,

    /// Route definitions, tried in declaration order.
    pub routes: RouteTable,

    /// Session cookie settings.
    pub session: SessionConfig,

    /// Password hashing and response hardening.
    pub security: SecurityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Front controller configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Expose raw not-found messages in 404 bodies.
    pub debug: bool,

    /// Action re-entered when a protected action is hit anonymously.
    pub login_action: ActionRef,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            debug: false,
            login_action: ActionRef {
                controller: "account".to_string(),
                action: "signin".to_string(),
            },
        }
    }
}

/// A `(controller, action)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActionRef {
    pub controller: String,
    pub action: String,
}

/// One declarative route.
///
/// `controller` and `action` are defaults; a placeholder of the same name in
/// `pattern` supplies the value instead.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// URL pattern, e.g. `/user/:user_name`.
    pub pattern: String,

    /// Default controller name.
    #[serde(default)]
    pub controller: Option<String>,

    /// Default action name.
    #[serde(default)]
    pub action: Option<String>,
}

impl RouteConfig {
    pub fn new(pattern: &str, controller: &str, action: Option<&str>) -> Self {
        Self {
            pattern: pattern.to_string(),
            controller: Some(controller.to_string()),
            action: action.map(str::to_string),
        }
    }
}

/// Ordered route declarations. Order is significant: first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RouteTable(pub Vec<RouteConfig>);

impl Default for RouteTable {
    fn default() -> Self {
        Self(vec![
            RouteConfig::new("/", "status", Some("index")),
            RouteConfig::new("/status/post", "status", Some("post")),
            RouteConfig::new("/user/:user_name", "status", Some("user")),
            RouteConfig::new("/user/:user_name/status/:id", "status", Some("show")),
            RouteConfig::new("/account", "account", Some("index")),
            RouteConfig::new("/account/:action", "account", None),
            RouteConfig::new("/follow", "account", Some("follow")),
        ])
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id.
    pub cookie_name: String,

    /// Seconds a session may sit unused before it expires.
    pub idle_timeout_secs: u64,

    /// Seconds between sweeps of expired sessions.
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "MINIBLOGSESSID".to_string(),
            idle_timeout_secs: 1440,
            sweep_interval_secs: 60,
        }
    }
}

/// Security configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Salt appended to passwords before hashing.
    pub password_salt: String,
    /// Enable security response headers.
    pub enable_headers: bool,
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            password_salt: "SecretKey".to_string(),
            enable_headers: true,
            max_body_size: 64 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset.
    pub log_filter: String,

    /// Emit JSON log lines instead of human-readable text.
    pub json_logs: bool,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Prometheus scrape address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "miniblog=debug,tower_http=info".to_string(),
            json_logs: false,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [app]
            debug = true
            "#,
        )
        .unwrap();

        assert!(config.app.debug);
        assert_eq!(config.app.login_action.controller, "account");
        assert_eq!(config.routes.0.len(), 7);
        assert_eq!(config.session.cookie_name, "MINIBLOGSESSID");
    }

    #[test]
    fn test_routes_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "/"
            controller = "status"
            action = "index"

            [[routes]]
            pattern = "/account/:action"
            controller = "account"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.0.len(), 2);
        assert_eq!(config.routes.0[1].action, None);
    }
}
