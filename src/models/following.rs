//! Follow relationships.

use crate::models::user::UserId;
use crate::models::RepositoryError;

/// Follow persistence. A `(user_id, following_id)` pair exists at most once.
pub trait FollowingRepository: Send + Sync {
    /// Record that `user_id` follows `following_id`.
    ///
    /// Returns `false` when the pair already existed.
    fn insert(&self, user_id: UserId, following_id: UserId) -> Result<bool, RepositoryError>;

    fn is_following(&self, user_id: UserId, following_id: UserId) -> bool;

    /// Number of stored relationships.
    fn count(&self) -> usize;
}
