use anyhow::Context;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use crmdash::config::AppConfig;
use crmdash::core::state::AppState;
use crmdash::main_module::run_axum_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            error!("Create a .env file with HUBSPOT_ACCESS_TOKEN set to your HubSpot private app token");
            std::process::exit(1);
        }
    };
    info!("Loaded configuration: {config:?}");

    let app_state = Arc::new(AppState::new(config));
    run_axum_server(app_state)
        .await
        .context("HTTP server failed")?;

    info!("Goodbye!");
    Ok(())
}
