use std::net::SocketAddr;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, FromRequestParts},
    http::request::Parts,
    Json,
};

use crate::error::AppError;
use crate::state::AppState;

/// Hostname of the machine making the request, derived from its peer address
pub struct ClientHost(pub String);

impl FromRequestParts<AppState> for ClientHost {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ConnectInfo(peer) = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Internal(format!("Peer address unavailable: {}", e)))?;

        // IPv4 clients on a dual-stack listener show up as ::ffff:a.b.c.d
        let hostname = state.host_resolver.resolve(peer.ip().to_canonical()).await?;
        Ok(ClientHost(hostname))
    }
}

/// Unwrap an upsert body, reporting unreadable JSON as 406 like other upsert failures
pub fn upsert_body<T>(body: std::result::Result<Json<T>, JsonRejection>) -> crate::error::Result<T> {
    body.map(|Json(data)| data)
        .map_err(|e| AppError::NotAcceptable(e.body_text()))
}
