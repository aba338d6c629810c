use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::client_ip;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Submission, SubmissionStatus};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub client_id: Option<Value>,
    pub data: Option<Value>,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub submission_id: Option<Value>,
}

pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let ip = client_ip::extract_ip(&headers, addr.ip(), &state.config.trusted_proxies);
    if let Err(retry_after) = state.submission_limiter.check(ip) {
        return Err(AppError::RateLimited(format!(
            "Rate limited. Retry after {retry_after}s"
        )));
    }

    // Unparseable bodies are reported the same way as missing fields.
    let (client_id, data) = match body {
        Ok(Json(req)) => (req.client_id, req.data),
        Err(rejection) => {
            reject_oversized(&rejection)?;
            tracing::debug!("Rejected submit body: {rejection}");
            (None, None)
        }
    };
    let client_id = client_id
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default();

    let submission_id = state
        .registry
        .submit(client_id, data.unwrap_or(Value::Null))
        .await?;

    audit::log_event(
        "submission.created",
        &submission_id,
        Some(json!({ "client_id": client_id, "ip": ip.to_string() })),
    );

    Ok(Json(json!({
        "submission_id": submission_id,
        "status": "Data submitted successfully.",
    })))
}

pub async fn approve(
    State(state): State<SharedState>,
    body: Result<Json<ApproveRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let submission_id = match body {
        Ok(Json(req)) => req
            .submission_id
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_default(),
        Err(rejection) => {
            reject_oversized(&rejection)?;
            tracing::debug!("Rejected approve body: {rejection}");
            String::new()
        }
    };

    let certificate = state.registry.approve(&submission_id).await?;

    audit::log_event(
        "submission.approved",
        &submission_id,
        Some(json!({ "certificate": certificate })),
    );

    Ok(Json(json!({
        "submission_id": submission_id,
        "certificate": certificate,
        "status": SubmissionStatus::Approved.as_str(),
    })))
}

/// Bodies cut off by the size limit keep their 413.
fn reject_oversized(rejection: &JsonRejection) -> Result<(), AppError> {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Err(AppError::PayloadTooLarge(rejection.body_text()));
    }
    Ok(())
}

pub async fn status(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Submission>, AppError> {
    let submission = state.registry.get_status(&id).await?;
    Ok(Json(submission))
}
