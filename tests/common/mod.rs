//! Test helpers shared by the integration tests.
//!
//! Builds an in-memory SQLite database, an `AppState` with a static hostname
//! table, and a router that sees requests as coming from a fixed peer address.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::connect_info::MockConnectInfo,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::util::ServiceExt;

use bootswitch::config::boot::BootSettings;
use bootswitch::endpoints::create_router;
use bootswitch::migrations::Migrator;
use bootswitch::models::machine::SwitchType;
use bootswitch::schemas::{BootConfig, MachineUpsert, Variable};
use bootswitch::services::StaticResolver;
use bootswitch::state::AppState;

/// Address the static resolver maps to `pxe01`
pub const PXE01_ADDR: [u8; 4] = [10, 0, 0, 5];
/// Address the static resolver maps to `pxe02`
pub const PXE02_ADDR: [u8; 4] = [10, 0, 0, 6];
/// Address no resolver knows
pub const STRANGER_ADDR: [u8; 4] = [10, 0, 0, 99];

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

pub fn test_resolver() -> StaticResolver {
    let hosts: HashMap<IpAddr, String> = [
        (IpAddr::from(PXE01_ADDR), "pxe01".to_string()),
        (IpAddr::from(PXE02_ADDR), "pxe02".to_string()),
    ]
    .into_iter()
    .collect();
    StaticResolver::new(hosts)
}

/// Build application state for testing
pub fn build_app_state(db: DatabaseConnection) -> AppState {
    AppState::new(db, &BootSettings::default(), Arc::new(test_resolver()))
}

/// Database and state with the `install`/`rescue` configs and a `server` variable
pub async fn create_seeded_state() -> AppState {
    let state = build_app_state(create_test_db().await);
    seed_boot_data(&state).await;
    state
}

pub async fn seed_boot_data(state: &AppState) {
    for (title, config) in [
        ("install", "#!ipxe\nchain http://{server}/install.ipxe"),
        ("rescue", "#!ipxe\nchain http://{server}/rescue.ipxe"),
    ] {
        state
            .inventory
            .upsert_boot_config(BootConfig {
                title: title.to_string(),
                config: config.to_string(),
            })
            .await
            .unwrap();
    }
    state
        .inventory
        .upsert_variable(Variable {
            key: "server".to_string(),
            value: "10.0.0.1".to_string(),
        })
        .await
        .unwrap();
}

pub async fn register_machine(state: &AppState, hostname: &str, switch_type: SwitchType) {
    state
        .inventory
        .upsert_machine(MachineUpsert {
            hostname: hostname.to_string(),
            default_boot: "install".to_string(),
            alternate_boot: "rescue".to_string(),
            switch_type,
            time_between: None,
        })
        .await
        .unwrap();
}

/// Router whose requests appear to come from `peer`
pub fn app_from(state: AppState, peer: [u8; 4]) -> Router {
    create_router(state).layer(MockConnectInfo(SocketAddr::from((peer, 40000))))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method(method)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .method("DELETE")
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&bytes).to_string())
}

pub async fn body_json(response: Response) -> (StatusCode, serde_json::Value) {
    let (status, body) = body_string(response).await;
    let json = serde_json::from_str(&body)
        .unwrap_or_else(|e| panic!("body is not JSON ({}): {}", e, body));
    (status, json)
}
