//! In-memory submission registry.
//!
//! All records and the id generator sit behind a single `RwLock`. `submit`
//! and `approve` hold the write lock for their whole check-and-mutate
//! sequence; `get_status` and `summarize` share the read lock.

pub mod id;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::{ComplianceSummary, Submission, SubmissionStatus};

use id::SubmissionIdGenerator;

pub const VALIDATION_MESSAGE: &str = "Client ID and data are required.";
pub const NOT_FOUND_MESSAGE: &str = "Submission ID not found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    Validation(String),
    NotFound(String),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::Validation(msg) => write!(f, "Validation error: {msg}"),
            RegistryError::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Default)]
struct Inner {
    submissions: HashMap<String, Submission>,
    ids: SubmissionIdGenerator,
}

#[derive(Default)]
pub struct SubmissionRegistry {
    inner: RwLock<Inner>,
}

impl SubmissionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new Pending submission and return its identifier.
    pub async fn submit(
        &self,
        client_id: &str,
        payload: serde_json::Value,
    ) -> Result<String, RegistryError> {
        self.submit_at(client_id, payload, Utc::now()).await
    }

    pub(crate) async fn submit_at(
        &self,
        client_id: &str,
        payload: serde_json::Value,
        now: DateTime<Utc>,
    ) -> Result<String, RegistryError> {
        if client_id.is_empty() || is_empty_payload(&payload) {
            return Err(RegistryError::Validation(VALIDATION_MESSAGE.to_string()));
        }

        let mut inner = self.inner.write().await;
        let Inner { submissions, ids } = &mut *inner;

        let id = ids.next(now, |candidate| submissions.contains_key(candidate));
        submissions.insert(
            id.clone(),
            Submission {
                id: id.clone(),
                client_id: client_id.to_string(),
                payload,
                status: SubmissionStatus::Pending,
                created_at: now,
            },
        );

        Ok(id)
    }

    /// Mark a submission Approved and return its certificate.
    ///
    /// Approving an already approved submission changes nothing and yields
    /// the same certificate.
    pub async fn approve(&self, id: &str) -> Result<String, RegistryError> {
        let mut inner = self.inner.write().await;
        let submission = inner
            .submissions
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        if submission.status == SubmissionStatus::Approved {
            tracing::debug!(submission_id = %id, "Submission already approved");
        }
        submission.status = SubmissionStatus::Approved;

        Ok(submission.certificate())
    }

    pub async fn get_status(&self, id: &str) -> Result<Submission, RegistryError> {
        self.inner
            .read()
            .await
            .submissions
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    pub async fn summarize(&self) -> ComplianceSummary {
        let inner = self.inner.read().await;
        let total_submissions = inner.submissions.len();
        let approved = inner
            .submissions
            .values()
            .filter(|s| s.status == SubmissionStatus::Approved)
            .count();

        ComplianceSummary {
            total_submissions,
            approved,
            pending: total_submissions - approved,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.submissions.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Payloads are opaque, but falsy values count as missing.
pub fn is_empty_payload(payload: &serde_json::Value) -> bool {
    use serde_json::Value;

    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
