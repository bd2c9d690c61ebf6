//! Process-lifetime session storage.
//!
//! # Responsibilities
//! - Keep session state keyed by session identifier
//! - Hand out a working copy at request start
//! - Write the copy back at request end, retiring regenerated identifiers
//! - Expire sessions left idle longer than the configured timeout
//!
//! # Design Decisions
//! - Sharded concurrent map; requests for different identifiers never contend
//! - Same-identifier requests are last-write-wins, no extra serialization
//! - Unknown or expired client identifiers are not adopted; a fresh one is issued
//! - A session with no state is never stored, so clients that drop the
//!   cookie cost nothing
//! - Expired entries are swept by [`SessionStore::prune_expired`], driven
//!   from a background task

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::session::handle::{Session, SessionData};
use crate::session::SessionId;

/// Default idle lifetime of a session.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(1440);

#[derive(Debug)]
struct StoredSession {
    data: SessionData,
    touched: Instant,
}

impl StoredSession {
    fn is_expired(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.touched) >= idle_timeout
    }
}

/// In-memory session store shared by all requests.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<SessionId, StoredSession>,
    idle_timeout: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_idle_timeout(DEFAULT_IDLE_TIMEOUT)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_idle_timeout(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Load the session named by the client, or start a new one.
    pub fn start(&self, client_id: Option<&str>) -> Session {
        if let Some(id) = client_id.map(SessionId::from) {
            let now = Instant::now();
            let expired = match self.sessions.get(&id) {
                Some(stored) if !stored.is_expired(now, self.idle_timeout) => {
                    return Session::new(id, stored.data.clone());
                }
                Some(_) => true,
                None => false,
            };

            if expired {
                self.sessions.remove(&id);
                tracing::debug!(session = %id, "Session expired, starting a new session");
            } else {
                tracing::debug!(session = %id, "Unknown session id, starting a new session");
            }
        }

        Session::new(SessionId::generate(), SessionData::new())
    }

    /// Persist `session` and return the identifier the client should keep.
    ///
    /// A session without state is dropped instead of stored.
    pub fn commit(&self, session: Session) -> SessionId {
        let (id, data, retired) = session.into_parts();

        for old in retired {
            self.sessions.remove(&old);
        }

        if data.is_empty() {
            self.sessions.remove(&id);
        } else {
            self.sessions.insert(
                id.clone(),
                StoredSession {
                    data,
                    touched: Instant::now(),
                },
            );
        }

        id
    }

    /// Drop every session idle for longer than the timeout. Returns how many were removed.
    pub fn prune_expired(&self) -> usize {
        self.prune_expired_at(Instant::now())
    }

    fn prune_expired_at(&self, now: Instant) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| !stored.is_expired(now, self.idle_timeout));
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::debug!(removed, remaining = self.sessions.len(), "Expired sessions pruned");
        }
        removed
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }
}
