//! Payroll Structuring Engine HTTP server.

use std::env;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const CONFIG_DIR_VAR: &str = "PAYROLL_ENGINE_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(payroll_engine::error::EngineError::ConfigNotFound { path }) => {
            warn!(path = %path, "Configuration file missing, using built-in defaults");
            ConfigLoader::with_defaults()
        }
        Err(error) => return Err(error.into()),
    };

    let address = format!("{}:{}", config.server().host, config.server().port);
    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, config_dir = %config_dir, "Payroll Structuring Engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
