use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::api::AppState;

/// Liveness probe: returns 200 OK if the server process is running.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Readiness probe: returns 200 OK when the database answers a ping.
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable"),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.database.ping().await {
        Ok(()) => Ok(Json(json!({"status": "ready", "database_connected": true}))),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "database_connected": false,
                    "error": e.to_string(),
                })),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Result;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_readiness_with_open_database() -> Result<()> {
        let db = setup_test_db().await?;

        let Json(body) = readiness_check(State(AppState::new(db))).await.unwrap();
        assert_eq!(body["status"], "ready");

        Ok(())
    }

    #[tokio::test]
    async fn test_readiness_with_closed_database() -> Result<()> {
        let db = setup_test_db().await?;
        let state = AppState::new(db.clone());
        db.close().await?;

        let (status, Json(body)) = readiness_check(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not_ready");
        assert_eq!(body["database_connected"], false);

        Ok(())
    }
}
