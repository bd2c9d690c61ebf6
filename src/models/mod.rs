//! Persistence collaborators.
//!
//! Controllers talk to storage only through the repository traits defined
//! here. The bundled backend keeps everything in memory.

pub mod following;
pub mod memory;
pub mod status;
pub mod user;

use std::sync::Arc;

pub use following::FollowingRepository;
pub use memory::MemoryStore;
pub use status::{Status, StatusId, StatusRepository};
pub use user::{User, UserId, UserRepository};

use crate::security::PasswordHasher;

/// Repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("user name already taken: {0}")]
    DuplicateUserName(String),

    #[error("unknown user id: {0}")]
    UnknownUser(UserId),
}

/// Handles to every repository, shared by all requests.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub statuses: Arc<dyn StatusRepository>,
    pub followings: Arc<dyn FollowingRepository>,
}

impl Repositories {
    /// All three repositories backed by one [`MemoryStore`].
    pub fn in_memory(hasher: PasswordHasher) -> Self {
        let store = Arc::new(MemoryStore::new(hasher));
        Self {
            users: store.clone(),
            statuses: store.clone(),
            followings: store,
        }
    }
}
