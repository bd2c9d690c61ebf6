//! Request abstraction handed to the dispatcher.
//!
//! # Responsibilities
//! - Carry method, path info, query and form parameters
//! - Strip the query string from the path before routing
//!
//! # Design Decisions
//! - Decoupled from axum types so dispatch is synchronous and testable
//! - Missing parameters read as `None`; callers decide on defaults

use std::collections::HashMap;

use axum::http::Method;

/// A request as seen by routing and controllers.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path_info: String,
    query: HashMap<String, String>,
    post: HashMap<String, String>,
}

impl Request {
    /// Build a request from a raw request target (`/path?query`).
    pub fn new(method: Method, target: &str) -> Self {
        let path_info = match target.find('?') {
            Some(pos) => &target[..pos],
            None => target,
        };

        Self {
            method,
            path_info: path_info.to_string(),
            query: HashMap::new(),
            post: HashMap::new(),
        }
    }

    /// Shorthand for a GET request.
    pub fn get(target: &str) -> Self {
        Self::new(Method::GET, target)
    }

    /// Shorthand for a form POST.
    pub fn post<K, V>(target: &str, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(Method::POST, target).with_form(form)
    }

    pub fn with_query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn with_form<K, V>(mut self, form: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.post = form.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    /// Path without query string.
    pub fn path_info(&self) -> &str {
        &self.path_info
    }

    /// Query-string parameter.
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Form body parameter.
    pub fn post_param(&self, name: &str) -> Option<&str> {
        self.post.get(name).map(String::as_str)
    }
}
