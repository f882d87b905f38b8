// Modules
pub mod app;
pub mod config;
pub mod display;
pub mod handlers;
pub mod models;
pub mod services;
pub mod theme;
pub mod utils;

#[cfg(test)]
mod tests;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Installs the log subscriber. `RUST_LOG` wins over the configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("terminal_hub_lib={level},terminal_hub={level}")));
    // `log` records are bridged into the subscriber by tracing-log.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    let path = config::config_path();
    let loaded = config::load_config_from(&path);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => config::default_config(),
    };

    init_logging(&config.app.log_level);
    match loaded {
        Ok(Some(_)) => log::info!("Loaded configuration from {}", path.display()),
        Ok(None) => log::info!("{} not found, using default configuration", path.display()),
        Err(e) => log::warn!("Error loading configuration, using defaults: {:#}", e),
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_console(config))
}
