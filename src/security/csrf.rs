//! CSRF token issuance and verification.
//!
//! # Responsibilities
//! - Issue a random token per form scope (`"controller/action"`)
//! - Verify a submitted token against the last one issued for that scope
//!
//! # Design Decisions
//! - Tokens live in the session under `csrf_tokens/<scope>`
//! - No expiry and no single-use invalidation: a token stays valid until a
//!   later issue for the same scope overwrites it
//! - Verification never errors; callers redirect to a safe view on `false`

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;

use crate::session::{Session, SessionError};

/// Form field carrying the token.
pub const TOKEN_FIELD: &str = "_token";

fn session_key(scope: &str) -> String {
    format!("csrf_tokens/{}", scope)
}

/// Generate a fresh token for `scope` and remember it in the session.
pub fn issue(scope: &str, session: &mut Session) -> Result<String, SessionError> {
    let bytes: [u8; 24] = rand::thread_rng().gen();
    let token = URL_SAFE_NO_PAD.encode(bytes);

    session.set(&session_key(scope), &token)?;
    Ok(token)
}

/// True iff `submitted` is non-empty and equals the last token issued for `scope`.
pub fn verify(scope: &str, session: &Session, submitted: &str) -> bool {
    if submitted.is_empty() {
        return false;
    }

    match session.get::<String>(&session_key(scope)) {
        Some(expected) => expected == submitted,
        None => false,
    }
}
