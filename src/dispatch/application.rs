//! The front controller.
//!
//! # Responsibilities
//! - Resolve the request path through the router
//! - Look up the controller and action
//! - Apply the authorization guard
//! - Run the action, or fall back to the login action once
//! - Turn every failure into a terminal response
//!
//! # Design Decisions
//! - Dispatch is synchronous: no suspension points inside one request
//! - Not-found and unauthorized are explicit variants, handled by branching
//! - The login fallback is single-level; it is checked at construction so a
//!   second unauthorized cannot happen with a valid registry

use std::collections::HashMap;

use crate::config::{ActionRef, AppConfig};
use crate::dispatch::context::{ActionContext, ActionError};
use crate::dispatch::controller::{controller_id, ControllerRegistry};
use crate::dispatch::guard::{self, Authorization};
use crate::http::{Request, Response};
use crate::models::Repositories;
use crate::routing::{Resolution, Router};
use crate::session::Session;
use crate::views;

/// Why a dispatch step did not yield a response.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{0}")]
    NotFound(String),

    #[error("{controller}/{action} requires authentication")]
    Unauthorized { controller: String, action: String },

    #[error("{controller}/{action} failed: {source}")]
    Action {
        controller: String,
        action: String,
        #[source]
        source: ActionError,
    },
}

/// Configuration problems detected when building an [`Application`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("login controller '{0}' is not registered")]
    LoginControllerMissing(String),

    #[error("login action '{controller}/{action}' is not registered")]
    LoginActionMissing { controller: String, action: String },

    #[error("login action '{controller}/{action}' itself requires authentication")]
    LoginActionProtected { controller: String, action: String },
}

/// Which terminal state a dispatch ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Rendered,
    Redirected,
    NotFound,
    LoginFallback,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Rendered => "rendered",
            Outcome::Redirected => "redirected",
            Outcome::NotFound => "not_found",
            Outcome::LoginFallback => "login_fallback",
        }
    }
}

/// The front controller.
pub struct Application {
    router: Router,
    controllers: ControllerRegistry,
    repos: Repositories,
    login_action: ActionRef,
    debug: bool,
}

impl Application {
    /// Build the application with the bundled controllers.
    pub fn new(config: &AppConfig, repos: Repositories) -> Result<Self, AppError> {
        Self::with_controllers(config, repos, crate::controllers::registry())
    }

    /// Build the application with an explicit controller registry.
    pub fn with_controllers(
        config: &AppConfig,
        repos: Repositories,
        controllers: ControllerRegistry,
    ) -> Result<Self, AppError> {
        let login_action = config.app.login_action.clone();

        let login_controller = controllers
            .find(&login_action.controller)
            .ok_or_else(|| AppError::LoginControllerMissing(controller_id(&login_action.controller)))?;
        if login_controller.find_action(&login_action.action).is_none() {
            return Err(AppError::LoginActionMissing {
                controller: login_action.controller.clone(),
                action: login_action.action.clone(),
            });
        }
        if login_controller
            .auth_policy()
            .requires_authentication(&login_action.action)
        {
            return Err(AppError::LoginActionProtected {
                controller: login_action.controller.clone(),
                action: login_action.action.clone(),
            });
        }

        tracing::info!(
            routes = config.routes.0.len(),
            controllers = controllers.len(),
            login = %format!("{}/{}", login_action.controller, login_action.action),
            "Application initialized"
        );

        Ok(Self {
            router: Router::compile(&config.routes),
            controllers,
            repos,
            login_action,
            debug: config.app.debug,
        })
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Dispatch one request to completion.
    pub fn run(&self, request: &Request, session: &mut Session) -> Response {
        self.dispatch(request, session).0
    }

    /// Dispatch one request and report the terminal state reached.
    pub fn dispatch(&self, request: &Request, session: &mut Session) -> (Response, Outcome) {
        let result = match self.router.resolve(request.path_info()) {
            Resolution::Matched(m) => {
                self.run_action(&m.controller, &m.action, &m.path_params, request, session)
            }
            Resolution::NotFound => Err(DispatchError::NotFound(format!(
                "No route found for {}",
                request.path_info()
            ))),
        };

        match result {
            Ok(response) => {
                let outcome = match response {
                    Response::Redirect(_) => Outcome::Redirected,
                    Response::NotFound(_) => Outcome::NotFound,
                    Response::Rendered(_) => Outcome::Rendered,
                };
                (response, outcome)
            }
            Err(DispatchError::Unauthorized { controller, action }) => {
                tracing::debug!(
                    controller = %controller,
                    action = %action,
                    "Unauthorized, running login action"
                );
                let login = &self.login_action;
                let response = match self.run_action(
                    &login.controller,
                    &login.action,
                    &HashMap::new(),
                    request,
                    session,
                ) {
                    Ok(response) => response,
                    Err(e) => self.failure_response(e),
                };
                (response, Outcome::LoginFallback)
            }
            Err(e) => (self.failure_response(e), Outcome::NotFound),
        }
    }

    fn run_action(
        &self,
        controller_name: &str,
        action: &str,
        params: &HashMap<String, String>,
        request: &Request,
        session: &mut Session,
    ) -> Result<Response, DispatchError> {
        let controller = self.controllers.find(controller_name).ok_or_else(|| {
            DispatchError::NotFound(format!("{} controller is not found.", controller_id(controller_name)))
        })?;

        let handler = controller.find_action(action).ok_or_else(|| {
            DispatchError::NotFound(format!(
                "Forwarded 404 page from {}/{}",
                controller_name, action
            ))
        })?;

        if guard::check(controller, action, session) == Authorization::Unauthorized {
            return Err(DispatchError::Unauthorized {
                controller: controller_name.to_string(),
                action: action.to_string(),
            });
        }

        let mut ctx = ActionContext::new(
            controller_name,
            action,
            request,
            params,
            session,
            &self.repos,
        );

        handler(&mut ctx).map_err(|source| match source {
            ActionError::NotFound(message) => DispatchError::NotFound(message),
            source => DispatchError::Action {
                controller: controller_name.to_string(),
                action: action.to_string(),
                source,
            },
        })
    }

    fn failure_response(&self, error: DispatchError) -> Response {
        match &error {
            DispatchError::NotFound(message) => {
                tracing::debug!(reason = %message, "Not found");
            }
            DispatchError::Unauthorized { .. } => {
                tracing::error!(error = %error, "Login action rejected an anonymous session");
            }
            DispatchError::Action { .. } => {
                tracing::error!(error = %error, "Action failed");
            }
        }
        self.render_404(&error.to_string())
    }

    fn render_404(&self, message: &str) -> Response {
        let message = if self.debug { message } else { "Page not found." };
        Response::NotFound(views::layout::not_found(message))
    }
}
