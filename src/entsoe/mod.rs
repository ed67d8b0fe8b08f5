//! ENTSO-E transparency platform.
//!
//! # Data Flow
//! ```text
//! GET /day_ahead_load_forecast?bidding_zone&period_start&period_end
//!     → request.rs (validate, build upstream query)
//!     → client.rs (GET with securityToken)
//!     → document.rs (XML → LoadForecast)
//! ```

pub mod client;
pub mod document;
pub mod request;

pub use client::EntsoeClient;
pub use document::{LoadForecast, Period, Point, TimeSeries};
pub use request::LoadForecastQuery;
