//! Upstream payload codecs.
//!
//! # Data Flow
//! ```text
//! XML body
//!     → xml.rs (shape normalization into serde_json::Value)
//!     → coerce.rs (serde adapters used by typed schemas)
//!     → typed record
//! ```

pub mod coerce;
pub mod xml;

pub use xml::{to_value, XmlDocument, XmlError};
