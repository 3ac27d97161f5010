//! Liveness report for load balancers and the operator dashboard.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok` when every dependency is usable, otherwise `degraded`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether uploads can be written to the storage directory.
    pub storage_healthy: bool,
}

/// GET /health
///
/// Always answers 200; a failing dependency only flips `status`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, storage) = tokio::join!(
        festival_db::health_check(&state.pool),
        state.storage.health_check(),
    );

    if let Err(err) = &db {
        tracing::warn!(error = %err, "Database health check failed");
    }
    if let Err(err) = &storage {
        tracing::warn!(
            error = %err,
            storage_dir = %state.storage.root().display(),
            "Upload storage health check failed"
        );
    }

    let db_healthy = db.is_ok();
    let storage_healthy = storage.is_ok();
    Json(HealthResponse {
        status: if db_healthy && storage_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage_healthy,
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
