//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path (query already stripped)
//!     → router.rs (ordered route scan)
//!     → matcher.rs (evaluate segment patterns)
//!     → Return: RouteMatch or NotFound
//!
//! Route Compilation (at startup):
//!     RouteTable
//!     → Compile patterns into literal/placeholder segments
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod matcher;
pub mod router;

pub use matcher::{PathPattern, Segment};
pub use router::{Resolution, Route, RouteMatch, Router};
