use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::transport::http::types::{AppState, ErrorBody, HealthResponse};

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (DB reachable)", body = HealthResponse),
        (status = 503, description = "Service is unhealthy (DB unreachable)", body = ErrorBody)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let Some(pool) = &state.pool else {
        // No pool to ping (in-memory store); the process being up is enough.
        return (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response();
    };
    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse { status: "ok" })).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody {
                error: format!("DB ping failed: {}", e),
            }),
        )
            .into_response(),
    }
}
