//! In-memory repository backend.
//!
//! # Design Decisions
//! - One lock over all tables so joins see a consistent snapshot
//! - Ids are assigned sequentially from 1, like an auto-increment column
//! - Uniqueness (user names, follow pairs) is enforced under the write lock

use std::collections::BTreeSet;

use chrono::Utc;
use parking_lot::RwLock;

use crate::models::following::FollowingRepository;
use crate::models::status::{Status, StatusId, StatusRepository};
use crate::models::user::{User, UserId, UserRepository};
use crate::models::RepositoryError;
use crate::security::PasswordHasher;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    statuses: Vec<StoredStatus>,
    followings: BTreeSet<(UserId, UserId)>,
}

#[derive(Debug, Clone)]
struct StoredStatus {
    id: StatusId,
    user_id: UserId,
    body: String,
    created_at: chrono::DateTime<Utc>,
}

impl Tables {
    fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    fn join(&self, status: &StoredStatus) -> Option<Status> {
        let user = self.user_by_id(status.user_id)?;
        Some(Status {
            id: status.id,
            user_id: status.user_id,
            user_name: user.user_name.clone(),
            body: status.body.clone(),
            created_at: status.created_at,
        })
    }

    /// Join and sort newest first.
    fn listing<'a>(&self, statuses: impl Iterator<Item = &'a StoredStatus>) -> Vec<Status> {
        let mut out: Vec<Status> = statuses.filter_map(|s| self.join(s)).collect();
        out.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        out
    }
}

/// Repository backend holding every table in process memory.
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    hasher: PasswordHasher,
}

impl MemoryStore {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            hasher,
        }
    }
}

impl UserRepository for MemoryStore {
    fn insert(&self, user_name: &str, password: &str) -> Result<User, RepositoryError> {
        let password_hash = self.hasher.hash(password);
        let mut tables = self.tables.write();

        if tables.users.iter().any(|u| u.user_name == user_name) {
            return Err(RepositoryError::DuplicateUserName(user_name.to_string()));
        }

        let user = User {
            id: tables.users.len() as UserId + 1,
            user_name: user_name.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        tracing::debug!(user_id = user.id, user_name = %user.user_name, "User inserted");
        Ok(user)
    }

    fn fetch_by_user_name(&self, user_name: &str) -> Option<User> {
        self.tables
            .read()
            .users
            .iter()
            .find(|u| u.user_name == user_name)
            .cloned()
    }

    fn is_unique_user_name(&self, user_name: &str) -> bool {
        !self.tables.read().users.iter().any(|u| u.user_name == user_name)
    }

    fn fetch_all_followings_by_user_id(&self, user_id: UserId) -> Vec<User> {
        let tables = self.tables.read();
        tables
            .followings
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, followed)| tables.user_by_id(*followed).cloned())
            .collect()
    }

    fn verify_password(&self, user: &User, password: &str) -> bool {
        self.hasher.verify(password, &user.password_hash)
    }
}

impl StatusRepository for MemoryStore {
    fn insert(&self, user_id: UserId, body: &str) -> Result<Status, RepositoryError> {
        let mut tables = self.tables.write();
        if tables.user_by_id(user_id).is_none() {
            return Err(RepositoryError::UnknownUser(user_id));
        }

        let stored = StoredStatus {
            id: tables.statuses.len() as StatusId + 1,
            user_id,
            body: body.to_string(),
            created_at: Utc::now(),
        };
        tables.statuses.push(stored.clone());

        tables
            .join(&stored)
            .ok_or(RepositoryError::UnknownUser(user_id))
    }

    fn fetch_all_personal_archives_by_user_id(&self, user_id: UserId) -> Vec<Status> {
        let tables = self.tables.read();
        tables.listing(tables.statuses.iter().filter(|s| {
            s.user_id == user_id || tables.followings.contains(&(user_id, s.user_id))
        }))
    }

    fn fetch_all_by_user_id(&self, user_id: UserId) -> Vec<Status> {
        let tables = self.tables.read();
        tables.listing(tables.statuses.iter().filter(|s| s.user_id == user_id))
    }

    fn fetch_by_id_and_user_name(&self, id: StatusId, user_name: &str) -> Option<Status> {
        let tables = self.tables.read();
        tables
            .statuses
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| tables.join(s))
            .filter(|s| s.user_name == user_name)
    }
}

impl FollowingRepository for MemoryStore {
    fn insert(&self, user_id: UserId, following_id: UserId) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write();
        for id in [user_id, following_id] {
            if tables.user_by_id(id).is_none() {
                return Err(RepositoryError::UnknownUser(id));
            }
        }
        Ok(tables.followings.insert((user_id, following_id)))
    }

    fn is_following(&self, user_id: UserId, following_id: UserId) -> bool {
        self.tables.read().followings.contains(&(user_id, following_id))
    }

    fn count(&self) -> usize {
        self.tables.read().followings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryStore {
        MemoryStore::new(PasswordHasher::new("salt"))
    }

    #[test]
    fn test_user_names_are_unique() {
        let store = store();
        let alice = UserRepository::insert(&store, "alice", "secret").unwrap();
        assert_eq!(alice.id, 1);
        assert!(!store.is_unique_user_name("alice"));
        assert!(store.is_unique_user_name("bob"));

        let err = UserRepository::insert(&store, "alice", "other").unwrap_err();
        assert!(matches!(err, RepositoryError::DuplicateUserName(_)));
    }

    #[test]
    fn test_password_verification() {
        let store = store();
        let alice = UserRepository::insert(&store, "alice", "secret").unwrap();
        assert_ne!(alice.password_hash, "secret");
        assert!(store.verify_password(&alice, "secret"));
        assert!(!store.verify_password(&alice, "wrong"));
    }

    #[test]
    fn test_personal_archive_includes_followed_users() {
        let store = store();
        let alice = UserRepository::insert(&store, "alice", "secret").unwrap();
        let bob = UserRepository::insert(&store, "bob", "secret").unwrap();
        let carol = UserRepository::insert(&store, "carol", "secret").unwrap();

        StatusRepository::insert(&store, alice.id, "from alice").unwrap();
        StatusRepository::insert(&store, bob.id, "from bob").unwrap();
        StatusRepository::insert(&store, carol.id, "from carol").unwrap();
        FollowingRepository::insert(&store, alice.id, bob.id).unwrap();

        let timeline = store.fetch_all_personal_archives_by_user_id(alice.id);
        let bodies: Vec<&str> = timeline.iter().map(|s| s.body.as_str()).collect();
        assert_eq!(bodies, vec!["from bob", "from alice"]);
        assert_eq!(timeline[0].user_name, "bob");
    }

    #[test]
    fn test_fetch_by_id_and_user_name() {
        let store = store();
        let alice = UserRepository::insert(&store, "alice", "secret").unwrap();
        UserRepository::insert(&store, "bob", "secret").unwrap();
        let status = StatusRepository::insert(&store, alice.id, "hello").unwrap();

        assert!(store.fetch_by_id_and_user_name(status.id, "alice").is_some());
        assert!(store.fetch_by_id_and_user_name(status.id, "bob").is_none());
        assert!(store.fetch_by_id_and_user_name(99, "alice").is_none());
    }

    #[test]
    fn test_following_pairs_are_unique() {
        let store = store();
        let alice = UserRepository::insert(&store, "alice", "secret").unwrap();
        let bob = UserRepository::insert(&store, "bob", "secret").unwrap();

        assert!(FollowingRepository::insert(&store, alice.id, bob.id).unwrap());
        assert!(!FollowingRepository::insert(&store, alice.id, bob.id).unwrap());
        assert_eq!(store.count(), 1);
        assert!(store.is_following(alice.id, bob.id));
        assert!(!store.is_following(bob.id, alice.id));

        let followings = store.fetch_all_followings_by_user_id(alice.id);
        assert_eq!(followings.len(), 1);
        assert_eq!(followings[0].user_name, "bob");
    }

    #[test]
    fn test_status_for_unknown_user() {
        let store = store();
        let err = StatusRepository::insert(&store, 42, "orphan").unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownUser(42)));
    }
}
