//! Marktstammdatenregister (MaStR) upstream.
//!
//! # Data Flow
//! ```text
//! inbound JSON
//!     → request.rs (required/optional enforcement, aliasing)
//!     → client.rs (apiKey injection, POST {api_url}/{Operation})
//!     → response.rs (schema validation, upstream names re-emitted)
//! ```

pub mod client;
pub mod request;
pub mod response;

pub use client::{MastrClient, MastrOperation};
pub use request::{EinheitRequest, NetzanschlusspunkteRequest};
pub use response::{
    EinheitBase, EinheitBiomasse, EinheitSolar, EinheitStromSpeicher, EinheitWind,
    NetzanschlusspunkteListe,
};
