//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, deadline)
//!     → handlers.rs (extract, validate, call upstream)
//!     → response.rs (errors as {"detail": ...})
//!     → Send to client
//! ```
//!
//! `docs.rs` describes the endpoints as OpenAPI and serves `/docs`.

pub mod docs;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::{AppState, HttpServer};
