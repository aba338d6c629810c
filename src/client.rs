//! HTTP client for dashboards that read from the audit service.
//!
//! Dashboards treat any failure as "no data available" and show a warning,
//! so [`ComplianceClient::dashboard`] folds every error into
//! [`DashboardView::Unavailable`] instead of returning one.

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::models::{ComplianceSummary, Submission};

#[derive(Debug)]
pub enum ClientError {
    Transport(reqwest::Error),
    Decode(reqwest::Error),
    Status(StatusCode),
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Transport(err) => write!(f, "Error connecting to the audit system: {err}"),
            ClientError::Decode(err) => write!(f, "Unreadable response from the audit system: {err}"),
            ClientError::Status(status) => write!(f, "Audit system responded with {status}"),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err)
        } else {
            ClientError::Transport(err)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Available(ComplianceSummary),
    Unavailable(String),
}

#[derive(Deserialize)]
struct DashboardEnvelope {
    dashboard: ComplianceSummary,
}

pub struct ComplianceClient {
    http: Client,
    base_url: String,
}

impl ComplianceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn dashboard(&self) -> DashboardView {
        match self.fetch_dashboard().await {
            Ok(summary) => DashboardView::Available(summary),
            Err(e) => {
                tracing::warn!("Compliance dashboard unavailable: {e}");
                DashboardView::Unavailable(e.to_string())
            }
        }
    }

    async fn fetch_dashboard(&self) -> Result<ComplianceSummary, ClientError> {
        let resp = self.http.get(self.url("/compliance_dashboard")).send().await?;
        if resp.status() != StatusCode::OK {
            return Err(ClientError::Status(resp.status()));
        }
        let envelope: DashboardEnvelope = resp.json().await?;
        Ok(envelope.dashboard)
    }

    /// Look up one submission. Unknown identifiers yield `Ok(None)`.
    pub async fn submission_status(&self, id: &str) -> Result<Option<Submission>, ClientError> {
        let resp = self
            .http
            .get(self.url(&format!("/submission_status/{id}")))
            .send()
            .await?;

        match resp.status() {
            StatusCode::OK => Ok(Some(resp.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            other => Err(ClientError::Status(other)),
        }
    }
}
