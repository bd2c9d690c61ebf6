//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Form render:
//!     controller → csrf.rs issue(scope) → token embedded as `_token`
//!
//! Form submission:
//!     controller → csrf.rs verify(scope, `_token`)
//!     → mismatch: redirect to the form's safe view
//!
//! Credentials:
//!     password.rs (salted hash) ← repositories
//!
//! Responses:
//!     headers.rs (hardening headers on every response)
//! ```

pub mod csrf;
pub mod headers;
pub mod password;

pub use password::PasswordHasher;
