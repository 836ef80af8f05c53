//! Backend entry-point: loads settings, selects storage and serves the API.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookings::inbound::http::health::HealthState;
use bookings::server::{ServerConfig, build_storage, create_server};
use bookings::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_args(std::env::args_os()).map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let storage = build_storage(&settings)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new(storage.clone()));
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, storage))?;
    info!(%bind_addr, "bookings server listening");

    let result = server.await;
    health_state.mark_unhealthy();
    result
}
