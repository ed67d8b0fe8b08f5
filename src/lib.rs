//! Energy data proxy library.
//!
//! A thin HTTP front for two public energy data services: the German market
//! master data registry (MaStR, JSON over POST) and the ENTSO-E transparency
//! platform (XML over GET). Credentials live in the proxy's configuration
//! and are injected into every outbound call.

// Core subsystems
pub mod config;
pub mod http;

// Upstreams
pub mod codec;
pub mod entsoe;
pub mod mastr;
pub mod upstream;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
