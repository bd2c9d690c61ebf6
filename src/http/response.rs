//! Dispatch responses.
//!
//! # Responsibilities
//! - Represent the three terminal outcomes of a dispatch
//! - Convert them into axum responses
//!
//! # Design Decisions
//! - Only 200, 404 and 302 can be expressed
//! - Redirect targets are site-relative paths, used verbatim as `Location`

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};

/// Terminal result of dispatching one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// 200 with an HTML body.
    Rendered(String),
    /// 404 with an HTML body.
    NotFound(String),
    /// 302 to a site path.
    Redirect(String),
}

impl Response {
    pub fn redirect(location: impl Into<String>) -> Self {
        Response::Redirect(location.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Response::Rendered(_) => StatusCode::OK,
            Response::NotFound(_) => StatusCode::NOT_FOUND,
            Response::Redirect(_) => StatusCode::FOUND,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Response::Redirect(location) => Some(location),
            _ => None,
        }
    }

    /// HTML body, empty for redirects.
    pub fn body(&self) -> &str {
        match self {
            Response::Rendered(body) | Response::NotFound(body) => body,
            Response::Redirect(_) => "",
        }
    }
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Rendered(body) => (StatusCode::OK, Html(body)).into_response(),
            Response::NotFound(body) => (StatusCode::NOT_FOUND, Html(body)).into_response(),
            Response::Redirect(location) => {
                (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
            }
        }
    }
}
