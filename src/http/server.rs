//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single fallback handler
//! - Wire up middleware (request ID, tracing, timeout, body limit, headers)
//! - Translate between axum requests and the dispatcher's [`Request`]
//! - Load and commit the session around each dispatch
//! - Sweep idle sessions in the background
//! - Serve until the shutdown coordinator fires
//!
//! # Design Decisions
//! - Axum does no routing of its own; every path reaches the dispatcher
//! - Dispatch is synchronous inside the handler; no awaits between session
//!   load and commit
//! - Form bodies are read only for POST

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::{Method, Uri},
    response::IntoResponse,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

use crate::config::AppConfig;
use crate::dispatch::{AppError, Application};
use crate::http::Request;
use crate::models::Repositories;
use crate::observability::metrics;
use crate::security::{self, PasswordHasher};
use crate::session::SessionStore;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub app: Arc<Application>,
    pub sessions: Arc<SessionStore>,
    pub cookie_name: Arc<str>,
}

/// HTTP front end for the application.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server backed by in-memory repositories.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let repos = Repositories::in_memory(PasswordHasher::new(
            config.security.password_salt.clone(),
        ));
        Self::with_repositories(config, repos)
    }

    pub fn with_repositories(config: AppConfig, repos: Repositories) -> Result<Self, AppError> {
        let state = AppState {
            app: Arc::new(Application::new(&config, repos)?),
            sessions: Arc::new(SessionStore::with_idle_timeout(Duration::from_secs(
                config.session.idle_timeout_secs,
            ))),
            cookie_name: Arc::from(config.session.cookie_name.as_str()),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let router = Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    ))),
            );

        if config.security.enable_headers {
            security::headers::apply(router)
        } else {
            router
        }
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let sweep_every = Duration::from_secs(self.config.session.sweep_interval_secs);
        tokio::spawn(sweep_sessions(
            self.state.sessions.clone(),
            sweep_every,
            shutdown.resubscribe(),
        ));

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!(
            sessions = self.state.sessions.len(),
            "HTTP server stopped"
        );
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// Periodically drop idle sessions until shutdown.
async fn sweep_sessions(
    sessions: Arc<SessionStore>,
    every: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sessions.prune_expired();
                metrics::record_sessions(sessions.len());
            }
            _ = shutdown.recv() => break,
        }
    }
    tracing::debug!("Session sweeper stopped");
}

fn request_span(request: &axum::http::Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    )
}

/// Single entry point: every request is dispatched by the [`Application`].
async fn dispatch_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    jar: CookieJar,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> impl IntoResponse {
    let start = Instant::now();

    let post = if method == Method::POST {
        match form {
            Ok(Form(fields)) => fields,
            Err(rejection) => {
                tracing::debug!(error = %rejection, "Unreadable form body, treating as empty");
                HashMap::new()
            }
        }
    } else {
        HashMap::new()
    };

    let request = Request::new(method.clone(), uri.path())
        .with_query(query.map(|Query(q)| q).unwrap_or_default())
        .with_form(post);

    let client_id = jar.get(&state.cookie_name).map(|c| c.value().to_string());
    let mut session = state.sessions.start(client_id.as_deref());

    let (response, outcome) = state.app.dispatch(&request, &mut session);

    let session_id = state.sessions.commit(session);
    let cookie = Cookie::build((state.cookie_name.to_string(), session_id.as_str().to_string()))
        .http_only(true)
        .path("/");

    let status = response.status();
    tracing::debug!(
        path = %request.path_info(),
        status = status.as_u16(),
        outcome = outcome.as_str(),
        "Request dispatched"
    );
    metrics::record_dispatch(method.as_str(), status.as_u16(), outcome.as_str(), start);
    metrics::record_sessions(state.sessions.len());

    (jar.add(cookie), response)
}
