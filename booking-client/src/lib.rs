//! Async API client for a booking/scheduling backend.
//!
//! # Overview
//! Thin pass-through client for a JSON-over-HTTP backend exposing businesses,
//! their services, per-date availability slots, and appointment creation. Each
//! operation performs exactly one request against a base URL injected at
//! construction, checks for a 2xx status, and returns the parsed body as an
//! untyped [`serde_json::Value`].
//!
//! # Design
//! - `BookingClient` is stateless beyond the base URL and the shared
//!   `reqwest` connection pool; concurrent calls are independent.
//! - All operations run through one wrapper, so failure handling is uniform:
//!   transport fault, non-2xx status, and JSON parse failure each produce a
//!   single `tracing` diagnostic naming the operation, then an [`ApiError`]
//!   for the caller. Nothing is retried or cached. Error messages follow Rust
//!   convention and are lowercase (`failed to fetch businesses: …`), not the
//!   backend frontend's historical `Failed to fetch businesses` casing —
//!   match on [`ApiError::operation`] rather than on message text.
//! - No domain types: the backend's schema is the backend's business.

pub mod client;
pub mod error;

pub use client::BookingClient;
pub use error::{ApiError, ErrorKind};
