//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (dispatch counters and latency histograms)
//!
//! Consumers:
//!     → stdout (text or JSON lines)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event, never interpolated messages
//! - Request ID comes from the `x-request-id` layer and rides on the trace span
//! - Metrics recording is a no-op until a recorder is installed

pub mod logging;
pub mod metrics;
