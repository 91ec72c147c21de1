use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::endpoints::extractors::upsert_body;
use crate::error::{AppError, Result};
use crate::schemas::{Machine, MachineUpsert};
use crate::state::AppState;

/// Create machine routes
pub fn machine_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/machine/", get(list_machines).put(put_machine))
        .route(
            "/api/v1/machine/{hostname}/",
            get(get_machine).post(post_machine).delete(delete_machine),
        )
        .with_state(state)
}

/// List registered hostnames
#[utoipa::path(
    get,
    path = "/api/v1/machine/",
    tag = "Machines",
    responses((status = 200, body = Vec<String>))
)]
pub async fn list_machines(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(state.inventory.list_hostnames().await?))
}

/// Create or update a machine, returning the hostname list
#[utoipa::path(
    put,
    path = "/api/v1/machine/",
    tag = "Machines",
    request_body = MachineUpsert,
    responses(
        (status = 200, body = Vec<String>),
        (status = 406, description = "Invalid body or unknown boot config")
    )
)]
pub async fn put_machine(
    State(state): State<AppState>,
    body: std::result::Result<Json<MachineUpsert>, JsonRejection>,
) -> Result<Json<Vec<String>>> {
    state.inventory.upsert_machine(upsert_body(body)?).await?;
    Ok(Json(state.inventory.list_hostnames().await?))
}

#[utoipa::path(
    get,
    path = "/api/v1/machine/{hostname}/",
    tag = "Machines",
    params(("hostname" = String, Path, description = "Machine hostname")),
    responses(
        (status = 200, body = Machine),
        (status = 404, description = "Unknown machine")
    )
)]
pub async fn get_machine(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Json<Machine>> {
    Ok(Json(state.inventory.get_machine(&hostname).await?))
}

/// Create or update the machine at this path
#[utoipa::path(
    post,
    path = "/api/v1/machine/{hostname}/",
    tag = "Machines",
    params(("hostname" = String, Path, description = "Machine hostname")),
    request_body = MachineUpsert,
    responses(
        (status = 200, body = Machine),
        (status = 406, description = "Invalid body, hostname mismatch or unknown boot config")
    )
)]
pub async fn post_machine(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
    body: std::result::Result<Json<MachineUpsert>, JsonRejection>,
) -> Result<Json<Machine>> {
    let data = upsert_body(body)?;
    if data.hostname != hostname {
        return Err(AppError::NotAcceptable(format!(
            "body hostname '{}' does not match path '{}'",
            data.hostname, hostname
        )));
    }
    Ok(Json(state.inventory.upsert_machine(data).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/machine/{hostname}/",
    tag = "Machines",
    params(("hostname" = String, Path, description = "Machine hostname")),
    responses(
        (status = 200, description = "Machine deleted"),
        (status = 404, description = "Unknown machine")
    )
)]
pub async fn delete_machine(
    State(state): State<AppState>,
    Path(hostname): Path<String>,
) -> Result<Json<Value>> {
    state.inventory.delete_machine(&hostname).await?;
    Ok(Json(json!({ "status": "ok" })))
}
