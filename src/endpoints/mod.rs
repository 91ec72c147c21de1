pub mod boot;
pub mod boot_configs;
pub mod extractors;
pub mod machines;
pub mod variables;

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::config::CONFIG;
use crate::models::machine::SwitchType;
use crate::schemas::{BootConfig, Machine, MachineUpsert, Variable};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(title = "bootswitch", description = "Network-boot configuration server"),
    paths(
        boot::boot,
        boot::boot_test,
        boot::boot_finished,
        machines::list_machines,
        machines::put_machine,
        machines::get_machine,
        machines::post_machine,
        machines::delete_machine,
        boot_configs::list_boot_configs,
        boot_configs::put_boot_config,
        boot_configs::get_boot_config,
        boot_configs::post_boot_config,
        boot_configs::delete_boot_config,
        variables::list_variables,
        variables::put_variable,
        variables::get_variable,
        variables::post_variable,
        variables::delete_variable,
    ),
    components(schemas(Machine, MachineUpsert, SwitchType, BootConfig, Variable))
)]
pub struct ApiDoc;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/system/version", get(get_version))
        .route("/api/openapi.json", get(openapi))
        .merge(boot::boot_routes(state.clone()))
        .merge(machines::machine_routes(state.clone()))
        .merge(boot_configs::boot_config_routes(state.clone()))
        .merge(variables::variable_routes(state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Version info endpoint
async fn get_version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": CONFIG.version,
        "commit_hash": CONFIG.commit_hash,
        "build_time": CONFIG.build_time,
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
