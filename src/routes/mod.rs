pub mod dashboard;
pub mod submissions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn compliance_routes() -> Router<SharedState> {
    Router::new()
        .route("/submit_data", post(submissions::submit))
        .route("/approve_submission", post(submissions::approve))
        .route("/submission_status/{id}", get(submissions::status))
        .route("/compliance_dashboard", get(dashboard::summary))
}
