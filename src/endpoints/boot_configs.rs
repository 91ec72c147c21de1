use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::endpoints::extractors::upsert_body;
use crate::error::{AppError, Result};
use crate::schemas::BootConfig;
use crate::state::AppState;

/// Create boot config routes
pub fn boot_config_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/boot_config/",
            get(list_boot_configs).put(put_boot_config),
        )
        .route(
            "/api/v1/boot_config/{title}/",
            get(get_boot_config)
                .post(post_boot_config)
                .delete(delete_boot_config),
        )
        .with_state(state)
}

/// List boot config titles
#[utoipa::path(
    get,
    path = "/api/v1/boot_config/",
    tag = "Boot configs",
    responses((status = 200, body = Vec<String>))
)]
pub async fn list_boot_configs(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.inventory.list_boot_config_titles().await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/boot_config/",
    tag = "Boot configs",
    request_body = BootConfig,
    responses(
        (status = 200, body = Vec<String>),
        (status = 406, description = "Invalid body")
    )
)]
pub async fn put_boot_config(
    State(state): State<AppState>,
    body: std::result::Result<Json<BootConfig>, JsonRejection>,
) -> Result<Json<Vec<String>>> {
    state.inventory.upsert_boot_config(upsert_body(body)?).await?;
    Ok(Json(state.inventory.list_boot_config_titles().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/boot_config/{title}/",
    tag = "Boot configs",
    params(("title" = String, Path, description = "Boot config title")),
    responses(
        (status = 200, body = BootConfig),
        (status = 404, description = "Unknown boot config")
    )
)]
pub async fn get_boot_config(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<BootConfig>> {
    Ok(Json(state.inventory.get_boot_config(&title).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/boot_config/{title}/",
    tag = "Boot configs",
    params(("title" = String, Path, description = "Boot config title")),
    request_body = BootConfig,
    responses(
        (status = 200, body = BootConfig),
        (status = 406, description = "Invalid body or title mismatch")
    )
)]
pub async fn post_boot_config(
    State(state): State<AppState>,
    Path(title): Path<String>,
    body: std::result::Result<Json<BootConfig>, JsonRejection>,
) -> Result<Json<BootConfig>> {
    let data = upsert_body(body)?;
    if data.title != title {
        return Err(AppError::NotAcceptable(format!(
            "body title '{}' does not match path '{}'",
            data.title, title
        )));
    }
    Ok(Json(state.inventory.upsert_boot_config(data).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/boot_config/{title}/",
    tag = "Boot configs",
    params(("title" = String, Path, description = "Boot config title")),
    responses(
        (status = 200, description = "Boot config deleted"),
        (status = 404, description = "Unknown boot config")
    )
)]
pub async fn delete_boot_config(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<Value>> {
    state.inventory.delete_boot_config(&title).await?;
    Ok(Json(json!({ "status": "ok" })))
}
