use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::endpoints::extractors::upsert_body;
use crate::error::{AppError, Result};
use crate::schemas::Variable;
use crate::state::AppState;

/// Create variable routes
pub fn variable_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/variable/", get(list_variables).put(put_variable))
        .route(
            "/api/v1/variable/{key}/",
            get(get_variable).post(post_variable).delete(delete_variable),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/v1/variable/",
    tag = "Variables",
    responses((status = 200, body = Vec<String>))
)]
pub async fn list_variables(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.inventory.list_variable_keys().await?))
}

#[utoipa::path(
    put,
    path = "/api/v1/variable/",
    tag = "Variables",
    request_body = Variable,
    responses(
        (status = 200, body = Vec<String>),
        (status = 406, description = "Invalid body")
    )
)]
pub async fn put_variable(
    State(state): State<AppState>,
    body: std::result::Result<Json<Variable>, JsonRejection>,
) -> Result<Json<Vec<String>>> {
    state.inventory.upsert_variable(upsert_body(body)?).await?;
    Ok(Json(state.inventory.list_variable_keys().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/variable/{key}/",
    tag = "Variables",
    params(("key" = String, Path, description = "Variable key")),
    responses(
        (status = 200, body = Variable),
        (status = 404, description = "Unknown variable")
    )
)]
pub async fn get_variable(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Variable>> {
    Ok(Json(state.inventory.get_variable(&key).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/variable/{key}/",
    tag = "Variables",
    params(("key" = String, Path, description = "Variable key")),
    request_body = Variable,
    responses(
        (status = 200, body = Variable),
        (status = 406, description = "Invalid body or key mismatch")
    )
)]
pub async fn post_variable(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: std::result::Result<Json<Variable>, JsonRejection>,
) -> Result<Json<Variable>> {
    let data = upsert_body(body)?;
    if data.key != key {
        return Err(AppError::NotAcceptable(format!(
            "body key '{}' does not match path '{}'",
            data.key, key
        )));
    }
    Ok(Json(state.inventory.upsert_variable(data).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/variable/{key}/",
    tag = "Variables",
    params(("key" = String, Path, description = "Variable key")),
    responses(
        (status = 200, description = "Variable deleted"),
        (status = 404, description = "Unknown variable")
    )
)]
pub async fn delete_variable(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    state.inventory.delete_variable(&key).await?;
    Ok(Json(json!({ "status": "ok" })))
}
