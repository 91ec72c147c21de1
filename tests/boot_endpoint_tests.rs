//! Boot endpoint integration tests
//!
//! Covers:
//! - GET /api/v1/boot/ for each switch type
//! - GET /api/v1/boot/test/{hostname}/ (dry run)
//! - GET /api/v1/boot/finished/
//! - Error statuses for unknown machines, dangling references and render failures

use axum::http::{header, StatusCode};
use serde_json::json;

mod common;
use common::*;

use bootswitch::models::machine::SwitchType;
use bootswitch::schemas::Variable;

const INSTALL: &str = "#!ipxe\nchain http://10.0.0.1/install.ipxe";
const RESCUE: &str = "#!ipxe\nchain http://10.0.0.1/rescue.ipxe";

// ============================================================================
// GET /api/v1/boot/
// ============================================================================

#[tokio::test]
async fn test_boot_returns_rendered_default_config() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;

    let response = get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let (status, body) = body_string(response).await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, INSTALL);
}

#[tokio::test]
async fn test_boot_switched_is_stable_without_completion() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;

    for _ in 0..3 {
        let (_, body) = body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await).await;
        assert_eq!(body, INSTALL);
    }
    let machine = state.inventory.get_machine("pxe01").await.unwrap();
    assert!(!machine.use_alternate);
}

#[tokio::test]
async fn test_boot_alternating_cycles() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Alternating).await;

    let mut bodies = Vec::new();
    for _ in 0..4 {
        let (status, body) =
            body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await).await;
        assert_eq!(status, StatusCode::OK);
        bodies.push(body);
    }
    assert_eq!(bodies, vec![INSTALL, RESCUE, INSTALL, RESCUE]);
}

#[tokio::test]
async fn test_boot_timed_serves_alternate_on_quick_retry() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Timed).await;

    let (_, first) = body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await).await;
    let (_, retry) = body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(first, INSTALL);
    assert_eq!(retry, RESCUE);
}

#[tokio::test]
async fn test_boot_identifies_machine_by_peer_address() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Alternating).await;
    register_machine(&state, "pxe02", SwitchType::Alternating).await;

    get(app_from(state.clone(), PXE02_ADDR), "/api/v1/boot/").await;

    assert!(!state.inventory.get_machine("pxe01").await.unwrap().use_alternate);
    assert!(state.inventory.get_machine("pxe02").await.unwrap().use_alternate);
}

#[tokio::test]
async fn test_boot_unknown_machine_is_404() {
    let state = create_seeded_state().await;

    let (status, body) = body_json(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["err"].as_str().unwrap().contains("pxe01"));
}

#[tokio::test]
async fn test_boot_unresolvable_address_is_404() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;

    let (status, body) = body_json(get(app_from(state, STRANGER_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["err"].as_str().unwrap().contains("10.0.0.99"));
}

#[tokio::test]
async fn test_boot_dangling_reference_is_409() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;
    state.inventory.delete_boot_config("install").await.unwrap();

    let (status, body) = body_json(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["err"].as_str().unwrap().contains("install"));
}

#[tokio::test]
async fn test_boot_missing_variable_is_422() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;
    state.inventory.delete_variable("server").await.unwrap();

    let (status, body) = body_json(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["err"].as_str().unwrap().contains("server"));
}

#[tokio::test]
async fn test_boot_malformed_template_is_422() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;
    let app = app_from(state.clone(), PXE01_ADDR);
    send_json(
        app.clone(),
        "PUT",
        "/api/v1/boot_config/",
        json!({"title": "install", "config": "chain http://{server/boot"}),
    )
    .await;

    let (status, _) = body_json(get(app, "/api/v1/boot/").await).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_boot_uses_current_variable_values() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;
    state
        .inventory
        .upsert_variable(Variable {
            key: "server".to_string(),
            value: "boot.lab".to_string(),
        })
        .await
        .unwrap();

    let (_, body) = body_string(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;
    assert_eq!(body, "#!ipxe\nchain http://boot.lab/install.ipxe");
}

// ============================================================================
// GET /api/v1/boot/test/{hostname}/
// ============================================================================

#[tokio::test]
async fn test_boot_test_does_not_persist() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Alternating).await;
    let before = state.inventory.get_machine("pxe01").await.unwrap();

    for _ in 0..3 {
        let (status, body) = body_string(
            get(app_from(state.clone(), STRANGER_ADDR), "/api/v1/boot/test/pxe01/").await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INSTALL);
    }

    assert_eq!(state.inventory.get_machine("pxe01").await.unwrap(), before);
}

#[tokio::test]
async fn test_boot_test_matches_next_committed_boot() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Alternating).await;
    get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await;

    let (_, preview) =
        body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/test/pxe01/").await).await;
    let (_, actual) = body_string(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(preview, RESCUE);
    assert_eq!(preview, actual);
}

#[tokio::test]
async fn test_boot_test_errors_are_plain_text() {
    let state = create_seeded_state().await;

    let response = get(app_from(state, PXE01_ADDR), "/api/v1/boot/test/ghost/").await;
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let (status, body) = body_string(response).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, "unknown machine 'ghost'");
}

// ============================================================================
// GET /api/v1/boot/finished/
// ============================================================================

#[tokio::test]
async fn test_finished_flips_switched_machine() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Switched).await;

    let (_, first) = body_string(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/").await).await;
    let (status, body) =
        body_json(get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/finished/").await).await;
    let (_, second) = body_string(get(app_from(state, PXE01_ADDR), "/api/v1/boot/").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(first, INSTALL);
    assert_eq!(second, RESCUE);
}

#[tokio::test]
async fn test_finished_does_not_touch_last_boot() {
    let state = create_seeded_state().await;
    register_machine(&state, "pxe01", SwitchType::Timed).await;
    let before = state.inventory.get_machine("pxe01").await.unwrap();

    get(app_from(state.clone(), PXE01_ADDR), "/api/v1/boot/finished/").await;

    let after = state.inventory.get_machine("pxe01").await.unwrap();
    assert_eq!(after.last_boot, before.last_boot);
    assert!(after.use_alternate);
}

#[tokio::test]
async fn test_finished_unknown_machine_is_404() {
    let state = create_seeded_state().await;

    let (status, body) =
        body_json(get(app_from(state, PXE02_ADDR), "/api/v1/boot/finished/").await).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["err"].as_str().unwrap().contains("pxe02"));
}
