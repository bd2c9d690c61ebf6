//! Per-action execution context.
//!
//! An [`ActionContext`] bundles everything an action may touch for one
//! request: the request itself, its session, the repositories and the path
//! parameters resolved by the router.

use std::collections::HashMap;

use crate::http::{Request, Response};
use crate::models::{Repositories, RepositoryError, User};
use crate::security::csrf;
use crate::session::{Session, SessionError};
use crate::views::{self, Page};

const USER_KEY: &str = "user";

/// Why an action did not produce a response.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The action asked for a 404 (unknown resource, wrong method, bad input).
    #[error("{0}")]
    NotFound(String),

    /// The session claims authentication but holds no user snapshot.
    #[error("authenticated session has no user snapshot")]
    MissingUser,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ActionError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ActionError::NotFound(message.into())
    }
}

pub type ActionResult = Result<Response, ActionError>;

/// What an action sees of the current request.
pub struct ActionContext<'a> {
    controller: &'a str,
    action: &'a str,
    request: &'a Request,
    params: &'a HashMap<String, String>,
    pub session: &'a mut Session,
    pub repos: &'a Repositories,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        controller: &'a str,
        action: &'a str,
        request: &'a Request,
        params: &'a HashMap<String, String>,
        session: &'a mut Session,
        repos: &'a Repositories,
    ) -> Self {
        Self {
            controller,
            action,
            request,
            params,
            session,
            repos,
        }
    }

    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// Path parameter captured by the router; absent means not found.
    pub fn path_param(&self, name: &str) -> Result<&'a str, ActionError> {
        self.params
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ActionError::not_found(format!("missing path parameter '{}'", name)))
    }

    /// Form field, empty when absent.
    pub fn form(&self, name: &str) -> &'a str {
        self.request.post_param(name).unwrap_or("")
    }

    /// Reject anything but POST with a 404.
    pub fn require_post(&self) -> Result<(), ActionError> {
        if self.request.is_post() {
            Ok(())
        } else {
            Err(ActionError::not_found(format!(
                "{}/{} only accepts POST",
                self.controller, self.action
            )))
        }
    }

    pub fn generate_csrf_token(&mut self, scope: &str) -> Result<String, ActionError> {
        Ok(csrf::issue(scope, &mut *self.session)?)
    }

    /// Compare the submitted `_token` field with the token issued for `scope`.
    pub fn check_csrf_token(&self, scope: &str) -> bool {
        let valid = csrf::verify(scope, &*self.session, self.form(csrf::TOKEN_FIELD));
        if !valid {
            tracing::warn!(scope = %scope, "CSRF token mismatch");
        }
        valid
    }

    /// The signed-in user's snapshot.
    pub fn current_user(&self) -> Result<User, ActionError> {
        self.session.get(USER_KEY).ok_or(ActionError::MissingUser)
    }

    /// Complete an authentication transition for `user`.
    pub fn sign_in(&mut self, user: &User) -> Result<(), ActionError> {
        self.session.set_authenticated(true);
        self.session.set(USER_KEY, user)?;
        tracing::info!(user_id = user.id, user_name = %user.user_name, "User signed in");
        Ok(())
    }

    /// Drop every piece of session state and become anonymous.
    pub fn sign_out(&mut self) {
        self.session.clear();
        self.session.set_authenticated(false);
    }

    /// Wrap `page` in the layout.
    pub fn render(&self, page: Page) -> ActionResult {
        Ok(Response::Rendered(views::layout(
            &page,
            self.session.is_authenticated(),
        )))
    }

    pub fn redirect(&self, location: impl Into<String>) -> ActionResult {
        Ok(Response::redirect(location))
    }
}
