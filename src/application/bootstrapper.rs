//! Application bootstrapper
//!
//! Handles all initialization and setup for the bootswitch server.

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use axum::Router;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::CONFIG;
use crate::db;
use crate::endpoints;
use crate::state::AppState;

/// Bootstrap and run the application
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting bootswitch v{}", CONFIG.version);

    let state = init_services().await?;
    let app = create_app(state);

    serve(app).await
}

/// Initialize tracing/logging
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("bootswitch={},tower_http={}", CONFIG.log_level, CONFIG.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if CONFIG.json_logs() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false))
            .init();
    }
}

/// Connect the database and wire the boot services
async fn init_services() -> anyhow::Result<AppState> {
    let conn = db::connect().await?;
    tracing::info!("Database connection established");

    if let Some(reason) = &CONFIG.boot.locking_rejected {
        tracing::warn!(
            "Ignoring BOOTSWITCH_BOOT_LOCKING ({}); falling back to {}",
            reason,
            CONFIG.boot.locking
        );
    }
    tracing::info!(
        "Boot locking: {}, default time_between: {}s",
        CONFIG.boot.locking,
        CONFIG.boot.default_time_between
    );

    Ok(AppState::from_settings(conn, &CONFIG.boot))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = CONFIG
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Create the main application router
fn create_app(state: AppState) -> Router {
    endpoints::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Start the HTTP server
async fn serve(app: Router) -> anyhow::Result<()> {
    let host: IpAddr = CONFIG.server.host.parse()?;
    let addr = SocketAddr::new(host, CONFIG.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    // Boot clients are identified by their peer address
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
