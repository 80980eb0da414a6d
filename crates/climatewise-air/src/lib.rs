//! Air-quality repository for ClimateWise.
//!
//! Map overlay imagery and grids (past slots by `gid`, forecasts by
//! `+H` hour offsets), per-product legends with an explicit cache,
//! point assessments, and ground stations.

pub mod cache;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod types;

pub use cache::LegendCache;
pub use client::AirClient;
pub use endpoint::AirEndpoint;
pub use error::AirError;
pub use types::*;
