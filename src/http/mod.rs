//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, session cookie)
//!     → request.rs (method, path info, query, form)
//!     → dispatch::Application (route, authorize, run action)
//!     → response.rs (200 page, 404 page, 302 redirect)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::Request;
pub use response::Response;
pub use server::{AppState, HttpServer};
