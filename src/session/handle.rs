//! The request-scoped session handle.
//!
//! A [`Session`] is a working copy of one client's session state for the
//! duration of a single request. It is loaded from the
//! [`SessionStore`](super::SessionStore) when the request starts and written
//! back when it ends.
//!
//! The handle also owns the one-shot regeneration flag: however many times an
//! authentication transition happens during a request, the identifier is
//! replaced at most once.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::session::SessionId;

const AUTHENTICATED_KEY: &str = "_authenticated";

/// Errors raised while writing typed values into a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to serialize session value '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Raw key/value session state as kept by the store.
pub type SessionData = HashMap<String, Value>;

/// Working copy of one session for one request.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    data: SessionData,
    /// Identifiers to destroy when the session is committed.
    retired: Vec<SessionId>,
    regenerated: bool,
}

impl Session {
    pub(crate) fn new(id: SessionId, data: SessionData) -> Self {
        Self {
            id,
            data,
            retired: Vec::new(),
            regenerated: false,
        }
    }

    /// Current session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Store `value` under `name`.
    pub fn set<T: Serialize>(&mut self, name: &str, value: &T) -> Result<(), SessionError> {
        let value = serde_json::to_value(value).map_err(|source| SessionError::Serialize {
            key: name.to_string(),
            source,
        })?;
        self.data.insert(name.to_string(), value);
        Ok(())
    }

    /// Read the value stored under `name`.
    ///
    /// A value that no longer deserializes as `T` is treated as absent.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.data.get(name)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!(session_key = %name, error = %e, "Discarding unreadable session value");
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.data.remove(name);
    }

    /// Wipe all keyed state. The identifier is kept.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Replace the session identifier, at most once per handle.
    ///
    /// With `destroy`, the old identifier's stored state is dropped on commit.
    pub fn regenerate(&mut self, destroy: bool) {
        if self.regenerated {
            return;
        }

        let old = std::mem::replace(&mut self.id, SessionId::generate());
        tracing::debug!(new_session = %self.id, "Session id regenerated");
        if destroy {
            self.retired.push(old);
        }
        self.regenerated = true;
    }

    /// Record the authentication state and regenerate the identifier.
    pub fn set_authenticated(&mut self, authenticated: bool) {
        self.data
            .insert(AUTHENTICATED_KEY.to_string(), Value::Bool(authenticated));

        self.regenerate(true);
    }

    pub fn is_authenticated(&self) -> bool {
        self.get(AUTHENTICATED_KEY).unwrap_or(false)
    }

    pub(crate) fn into_parts(self) -> (SessionId, SessionData, Vec<SessionId>) {
        (self.id, self.data, self.retired)
    }
}
