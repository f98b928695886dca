use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Json, Path, State},
    http::StatusCode,
};

use crate::dispatch::ActionDispatcher;
use crate::schemas::{ActionResult, ErrorResponse, HealthResponse, StatusResponse};

// ============================================================
// Status Handlers
// ============================================================

pub async fn get_status_handler(
    State(dispatcher): State<Arc<ActionDispatcher>>,
) -> Json<StatusResponse> {
    let online = dispatcher.check_status().await;
    tracing::info!("Status check: target is {}", if online { "online" } else { "offline" });
    Json(StatusResponse { online })
}

pub async fn get_health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        server_status: "Running".to_string(),
    })
}

// ============================================================
// Action Handlers
// ============================================================

pub async fn post_action_handler(
    State(dispatcher): State<Arc<ActionDispatcher>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Path(name): Path<String>,
) -> Result<Json<ActionResult>, (StatusCode, Json<ErrorResponse>)> {
    tracing::info!("Action '{}' requested by {}", name, peer.ip());

    match dispatcher.dispatch(&name, peer.ip()).await {
        Ok(result) => {
            tracing::info!(
                "Action '{}' completed: succeeded={} message={:?}",
                name,
                result.succeeded,
                result.message
            );
            Ok(Json(result))
        }
        Err(denied) => {
            let device = denied
                .resolved_link_address
                .map(|mac| mac.to_string())
                .unwrap_or_else(|| denied.caller.to_string());
            tracing::warn!("Denied action '{}' for {}", name, device);

            Err((
                StatusCode::FORBIDDEN,
                Json(ErrorResponse {
                    error: format!("Access denied: device {device} is not authorized"),
                }),
            ))
        }
    }
}
