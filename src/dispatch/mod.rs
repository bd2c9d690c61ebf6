//! Request dispatch core.
//!
//! # Responsibilities
//! - Front controller: route, look up, authorize, run ([`application`])
//! - Controller registration and auth policies ([`controller`])
//! - Per-action context: session, CSRF, repositories ([`context`])
//! - Authorization guard ([`guard`])
//!
//! # Data Flow
//! ```text
//! Request → Router::resolve → ControllerRegistry::find → guard::check
//!         → action(ActionContext) → Response
//!                         ↓ Unauthorized
//!                   login action (once)
//! ```

pub mod application;
pub mod context;
pub mod controller;
pub mod guard;

pub use application::{AppError, Application, DispatchError, Outcome};
pub use context::{ActionContext, ActionError, ActionResult};
pub use controller::{controller_id, ActionFn, AuthPolicy, Controller, ControllerRegistry};
pub use guard::Authorization;
