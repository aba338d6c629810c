use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::state::SharedState;

pub async fn summary(State(state): State<SharedState>) -> Json<Value> {
    let summary = state.registry.summarize().await;
    Json(json!({ "dashboard": summary }))
}
