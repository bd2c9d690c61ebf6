//! Status (short message) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::UserId;
use crate::models::RepositoryError;

pub type StatusId = u64;

/// A posted status, joined with its author's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub user_id: UserId,
    pub user_name: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Status persistence. Listings are newest first.
pub trait StatusRepository: Send + Sync {
    fn insert(&self, user_id: UserId, body: &str) -> Result<Status, RepositoryError>;

    /// The user's own statuses plus those of every user they follow.
    fn fetch_all_personal_archives_by_user_id(&self, user_id: UserId) -> Vec<Status>;

    fn fetch_all_by_user_id(&self, user_id: UserId) -> Vec<Status>;

    fn fetch_by_id_and_user_name(&self, id: StatusId, user_name: &str) -> Option<Status>;
}
