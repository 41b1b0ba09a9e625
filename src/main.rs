use std::error::Error;
use std::sync::Arc;

use log::info;
use scorecard_dashboard::client::HttpBackend;
use scorecard_dashboard::config::DashboardConfig;
use scorecard_dashboard::server::{start_server, DashboardState};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_env()?;
    info!("Using scorecard backend at {}", config.backend_url);

    let backend = Arc::new(HttpBackend::new(&config.backend_url)?);
    let state = DashboardState::new(backend, &config);

    info!("Starting scorecard dashboard on http://{}:{}", config.host, config.port);
    start_server(&config, state).await?;

    Ok(())
}
