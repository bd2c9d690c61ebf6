//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Resolve a path to a controller, an action and path parameters
//! - Return the match or an explicit not-found
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan over routes (acceptable for typical route counts)
//! - First match wins; declaration order is part of the contract
//! - Explicit NotFound rather than silent default

use std::collections::HashMap;

use crate::config::RouteTable;
use crate::routing::matcher::PathPattern;

/// A compiled route.
#[derive(Debug, Clone)]
pub struct Route {
    pub pattern: PathPattern,
    pub controller: Option<String>,
    pub action: Option<String>,
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub controller: String,
    pub action: String,
    /// Placeholder captures, keyed by placeholder name.
    pub path_params: HashMap<String, String>,
}

/// Result of [`Router::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    NotFound,
}

/// Ordered set of compiled routes.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Compile the declarative route table.
    pub fn compile(table: &RouteTable) -> Self {
        let routes = table
            .0
            .iter()
            .map(|def| Route {
                pattern: PathPattern::compile(&def.pattern),
                controller: def.controller.clone(),
                action: def.action.clone(),
            })
            .collect::<Vec<_>>();

        tracing::debug!(routes = routes.len(), "Routes compiled");

        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve `path` against the compiled routes.
    pub fn resolve(&self, path: &str) -> Resolution {
        let normalized;
        let path = if path.starts_with('/') {
            path
        } else {
            normalized = format!("/{}", path);
            &normalized
        };

        for route in &self.routes {
            let Some(path_params) = route.pattern.captures(path) else {
                continue;
            };

            let controller = path_params.get("controller").or(route.controller.as_ref());
            let action = path_params.get("action").or(route.action.as_ref());

            // Validation guarantees both are present for configured tables.
            let (Some(controller), Some(action)) = (controller.cloned(), action.cloned()) else {
                tracing::warn!(pattern = %route.pattern.source(), "Route matched without controller/action");
                continue;
            };

            return Resolution::Matched(RouteMatch {
                controller,
                action,
                path_params,
            });
        }

        Resolution::NotFound
    }
}
