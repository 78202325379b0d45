use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and active strategies.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "matcher-api",
        "budget_strategy": state.analyzer.budget_strategy(),
        "term_source": state.config.term_source,
        "external_credential": state.config.has_external_credential
    }))
}
