use anyhow::Result;

use climatewise_core::Config;

fn main() -> Result<()> {
    // Initialize core
    climatewise_core::init()?;

    let config = Config::load()?;
    let validation = config.validate();
    for warning in &validation.warnings {
        tracing::warn!("config: {warning}");
    }
    if !validation.is_valid() {
        anyhow::bail!("invalid configuration: {}", validation.error_summary());
    }

    tracing::info!("ClimateWise client started");

    println!("ClimateWise - Air Quality & Climate Companion");
    println!("\nConfiguration:");
    println!("  Config directory: {}", config.config_dir.display());
    println!("  API base URL:     {}", config.api.base_url);
    println!("  Preference store: {}", config.store_path().display());

    Ok(())
}
