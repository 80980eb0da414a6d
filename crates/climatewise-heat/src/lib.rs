//! Heat-anomaly repository for ClimateWise.
//!
//! Per-country temperature-anomaly records for map coloring, country
//! detail with yearly history, and global statistics. Same repository
//! shape as the gas client, over heat metrics.

pub mod client;
pub mod types;

pub use client::HeatClient;
pub use types::*;
