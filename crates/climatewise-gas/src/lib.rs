//! Greenhouse-gas repository for ClimateWise.
//!
//! Per-country emission records used to color map polygons, country
//! detail with yearly history, and global statistics. The most recent
//! country list is kept in an instance read cache for synchronous
//! lookups while the map is on screen.

pub mod client;
pub mod types;

pub use client::GasClient;
pub use types::*;
