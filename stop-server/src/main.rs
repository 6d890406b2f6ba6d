use std::sync::Arc;

use stop_server::config::ServerConfig;
use stop_server::domain::{ReferenceClock, current_minutes_in_reference_zone, format_minutes};
use stop_server::stops::StopCatalog;
use stop_server::web::{AppState, create_router, spawn_details_refresh};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stop_server=info")),
        )
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    // Load stops (fail fast if unavailable)
    let catalog = match StopCatalog::load(&config.stops_path) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!(
        now = %format_minutes(current_minutes_in_reference_zone()),
        "reference clock ready"
    );

    let state = AppState::new(catalog, Arc::new(ReferenceClock), &config);

    // Keep the details countdown current without user interaction
    spawn_details_refresh(state.clone());

    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            std::process::exit(1);
        }
    };

    info!("Bus stop directory listening on http://{}", config.addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
