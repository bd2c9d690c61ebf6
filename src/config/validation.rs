//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Every route must yield a controller and an action
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use crate::config::schema::{AppConfig, RouteConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check an [`AppConfig`] for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.routes.0.is_empty() {
        errors.push(ValidationError::new("routes", "at least one route is required"));
    }
    for (i, route) in config.routes.0.iter().enumerate() {
        validate_route(i, route, &mut errors);
    }

    let login = &config.app.login_action;
    if login.controller.is_empty() || login.action.is_empty() {
        errors.push(ValidationError::new(
            "app.login_action",
            "controller and action must be non-empty",
        ));
    }

    if config.session.cookie_name.is_empty() {
        errors.push(ValidationError::new("session.cookie_name", "must be non-empty"));
    }

    if config.session.idle_timeout_secs == 0 {
        errors.push(ValidationError::new("session.idle_timeout_secs", "must be > 0"));
    }

    if config.session.sweep_interval_secs == 0 {
        errors.push(ValidationError::new("session.sweep_interval_secs", "must be > 0"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(index: usize, route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    let field = format!("routes[{}]", index);

    if !route.pattern.starts_with('/') {
        errors.push(ValidationError::new(
            &field,
            format!("pattern '{}' must start with '/'", route.pattern),
        ));
    }

    let mut names = HashSet::new();
    for segment in route.pattern.trim_start_matches('/').split('/') {
        if let Some(name) = segment.strip_prefix(':') {
            if name.is_empty() {
                errors.push(ValidationError::new(&field, "placeholder without a name"));
            } else if !names.insert(name) {
                errors.push(ValidationError::new(
                    &field,
                    format!("placeholder ':{}' appears twice", name),
                ));
            }
        }
    }

    if route.controller.is_none() && !names.contains("controller") {
        errors.push(ValidationError::new(&field, "no controller default or :controller placeholder"));
    }
    if route.action.is_none() && !names.contains("action") {
        errors.push(ValidationError::new(&field, "no action default or :action placeholder"));
    }
}
