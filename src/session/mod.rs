//! Session subsystem.
//!
//! # Data Flow
//! ```text
//! Request start:
//!     cookie session id → store.rs (load snapshot or start new)
//!     → handle.rs Session (request-scoped working copy)
//!
//! During dispatch:
//!     controllers / guards read and write the Session
//!     authentication transitions regenerate the id (once per request)
//!
//! Request end:
//!     store.rs commit (retire old id, write state under current id)
//!     → current id returned to the client in the session cookie
//! ```

pub mod handle;
pub mod id;
pub mod store;

pub use handle::{Session, SessionData, SessionError};
pub use id::SessionId;
pub use store::SessionStore;
