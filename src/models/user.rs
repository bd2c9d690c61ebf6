//! User records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RepositoryError;

pub type UserId = u64;

/// A registered user. Also the snapshot kept in the session after sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User persistence.
pub trait UserRepository: Send + Sync {
    /// Create a user, hashing `password`.
    fn insert(&self, user_name: &str, password: &str) -> Result<User, RepositoryError>;

    fn fetch_by_user_name(&self, user_name: &str) -> Option<User>;

    fn is_unique_user_name(&self, user_name: &str) -> bool;

    /// Users followed by `user_id`.
    fn fetch_all_followings_by_user_id(&self, user_id: UserId) -> Vec<User>;

    /// True when `password` hashes to the stored hash of `user`.
    fn verify_password(&self, user: &User, password: &str) -> bool;
}
