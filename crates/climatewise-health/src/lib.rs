//! Health-advisor repository and client-side risk scoring.
//!
//! The risk calculator is a pure function over a user's sensitivity
//! tier and a static disease catalog; the repository submits the
//! resulting form to the backend and lists/deletes prior submissions.

pub mod client;
pub mod error;
pub mod scoring;
pub mod types;

pub use client::HealthClient;
pub use error::HealthError;
pub use scoring::{
    catalog, chip_level, disease_risk, overall_score, ChipLevel, DiseaseSpec, PollutantWeights,
    RiskBand,
};
pub use types::*;
