//! MiniBlog: a small social feed served by a front-controller dispatcher.
//!
//! Every request goes through one pipeline: the [`routing`] table turns the
//! path into a controller, an action and path parameters; the
//! [`dispatch`] core checks the controller's authentication policy against
//! the [`session`], runs the action from [`controllers`] and produces a
//! rendered page, a 404 page or a redirect.

// Request pipeline
pub mod config;
pub mod dispatch;
pub mod http;
pub mod routing;
pub mod session;

// Application
pub mod controllers;
pub mod models;
pub mod views;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::schema::AppConfig;
pub use dispatch::Application;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
