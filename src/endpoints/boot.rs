use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::endpoints::extractors::ClientHost;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create boot routes
pub fn boot_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/boot/", get(boot))
        .route("/api/v1/boot/test/{hostname}/", get(boot_test))
        .route("/api/v1/boot/finished/", get(boot_finished))
        .with_state(state)
}

/// Serve the boot config for the requesting machine and record the boot
#[utoipa::path(
    get,
    path = "/api/v1/boot/",
    tag = "Boot",
    responses(
        (status = 200, description = "Rendered boot config", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown machine or unresolvable client address"),
        (status = 409, description = "Machine references a missing boot config"),
        (status = 422, description = "Boot config cannot be rendered"),
        (status = 503, description = "Store unavailable")
    )
)]
pub async fn boot(State(state): State<AppState>, ClientHost(hostname): ClientHost) -> Result<String> {
    Ok(state.boot.resolve(&hostname, Utc::now(), true).await?)
}

/// Preview what `hostname` would boot right now without recording anything.
///
/// Failures come back as plain text so the output can be read as-is in a terminal.
#[utoipa::path(
    get,
    path = "/api/v1/boot/test/{hostname}/",
    tag = "Boot",
    params(("hostname" = String, Path, description = "Machine hostname")),
    responses(
        (status = 200, description = "Rendered boot config", body = String, content_type = "text/plain"),
        (status = 404, description = "Unknown machine", body = String, content_type = "text/plain")
    )
)]
pub async fn boot_test(State(state): State<AppState>, Path(hostname): Path<String>) -> Response {
    match state.boot.resolve(&hostname, Utc::now(), false).await {
        Ok(text) => text.into_response(),
        Err(e) => {
            let (status, message) = AppError::from(e).status_and_message();
            (status, message).into_response()
        }
    }
}

/// Mark the requesting machine's boot as finished
#[utoipa::path(
    get,
    path = "/api/v1/boot/finished/",
    tag = "Boot",
    responses(
        (status = 200, description = "Completion recorded"),
        (status = 404, description = "Unknown machine or unresolvable client address")
    )
)]
pub async fn boot_finished(
    State(state): State<AppState>,
    ClientHost(hostname): ClientHost,
) -> Result<Json<Value>> {
    state.boot.mark_complete(&hostname).await?;
    Ok(Json(json!({ "status": "ok" })))
}
