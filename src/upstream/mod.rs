//! Upstream call subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → mastr / entsoe client (build payload, inject credentials)
//!     → client.rs (send with per-call timeout, classify failure)
//!     → raw body back to the schema layer
//! ```
//!
//! # Design Decisions
//! - Exactly one outbound request per inbound request, no retries
//! - Transport errors are stripped of their URL before they are logged
//!   or returned, since query strings may hold tokens

pub mod client;

pub use client::UpstreamClient;
