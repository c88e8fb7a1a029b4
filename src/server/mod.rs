pub mod handlers;
pub mod types;

use crate::{
    Error, Result,
    artifacts,
    config::{Config, CorsConfig},
    house::HousePricePredictor,
};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::net::SocketAddr;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub use handlers::AppState;

/// Credentialed CORS. `"*"` accepts any origin by echoing it back, since a
/// literal wildcard cannot be combined with credentials.
fn cors_layer(config: &CorsConfig) -> Result<CorsLayer> {
    let allow_origin = if config.allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|e| {
                    Error::config(format!("Invalid CORS origin '{}': {}", origin, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn house_routes() -> Router<AppState> {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/cities", get(handlers::cities))
        .route("/furnishing-options", get(handlers::furnishing_options))
}

pub fn router(state: AppState, cors: &CorsConfig) -> Result<Router> {
    Ok(Router::new()
        .nest("/house", house_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors)?)
        .with_state(state))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

pub async fn run(config: Config) -> Result<()> {
    // Any artifact failure aborts startup
    let artifacts = artifacts::load(&config.artifacts).await?;
    let state = AppState::new(HousePricePredictor::from_artifacts(artifacts));

    let app = router(state, &config.server.cors)?;

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
