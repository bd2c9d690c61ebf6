//! Authorization guard.

use crate::dispatch::controller::Controller;
use crate::session::Session;

/// Outcome of [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    Unauthorized,
}

/// Unauthorized iff `action` is in the controller's auth set and the session
/// is anonymous.
pub fn check(controller: &Controller, action: &str, session: &Session) -> Authorization {
    if controller.auth_policy().requires_authentication(action) && !session.is_authenticated() {
        Authorization::Unauthorized
    } else {
        Authorization::Authorized
    }
}
