use std::process::ExitCode;
use std::sync::Arc;

use fare_server::catalog::{Catalog, CatalogError};
use fare_server::config::{AppConfig, ConfigError};
use fare_server::fare::FareCalculator;
use fare_server::routing::{
    CachedResolver, DistanceResolver, OsrmClient, RouteCacheConfig, RoutingError,
};
use fare_server::search::SearchEngine;
use fare_server::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reasons the server cannot start.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("location catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to create routing client: {0}")]
    Routing(#[from] RoutingError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = AppConfig::from_env()?;

    // The service must not serve without its dataset
    let catalog = Arc::new(Catalog::new(config.catalog_source()));
    let count = catalog.load()?;
    info!(count, path = %config.locations_path.display(), "Location catalog ready");

    let osrm = OsrmClient::new(config.osrm.clone())?;
    let routing = CachedResolver::new(osrm, &RouteCacheConfig::default());
    if !routing.ping().await {
        warn!(
            url = %config.osrm.base_url,
            fallback_km = config.fallback_km,
            "OSRM not reachable; fares between locations will use the default distance"
        );
    }

    let search = SearchEngine::new(Arc::clone(&catalog), config.search.clone());
    let fares = FareCalculator::new(config.rates.clone());
    let state = AppState::new(catalog, search, fares, Arc::new(routing), config.fallback_km);

    let app = create_router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "Bus fare backend listening");
    info!("API Endpoints:");
    info!("  GET  /health                 - Health check");
    info!("  GET  /api/locations          - All locations");
    info!("  GET  /api/locations/search   - Search locations (q, lang, limit)");
    info!("  GET  /api/locations/stats    - Catalog statistics");
    info!("  GET  /api/locations/:index   - Location by position");
    info!("  POST /api/calculate-fare     - Calculate a fare");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
