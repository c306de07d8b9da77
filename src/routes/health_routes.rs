use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Estado del servicio y de la base de datos
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let database_ok = match state.repository.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "⚠️ Base de datos no disponible");
            false
        }
    };

    let (status, service, database) = if database_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };

    (
        status,
        Json(json!({
            "status": service,
            "database": database,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
