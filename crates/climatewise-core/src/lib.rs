//! Core pieces of the ClimateWise client: configuration, the app-level
//! error type, screen fetch-state handling, and push-payload
//! normalization.

pub mod config;
pub mod error;
pub mod fetch_state;
pub mod push;

pub use config::{ApiConfig, Config, ValidationResult};
pub use error::AppError;
pub use fetch_state::{FetchSlot, FetchState};
pub use push::{PushMessage, PushSource};

use anyhow::Result;

/// Initialize tracing for the whole application.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("ClimateWise core initialized");
    Ok(())
}
