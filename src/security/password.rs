//! Password hashing.

use sha2::{Digest, Sha256};

/// Salted password hasher.
///
/// Hash = hex(SHA-256(password ‖ salt)). Adequate only as a stand-in for the
/// persistence collaborator; not a password KDF.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn hash(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hasher.update(self.salt.as_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn verify(&self, password: &str, hash: &str) -> bool {
        self.hash(password) == hash
    }
}
