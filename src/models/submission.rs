use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubmissionStatus {
    Pending,
    Approved,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "Pending",
            SubmissionStatus::Approved => "Approved",
        }
    }
}

/// A client's compliance data package as held by the registry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    #[serde(rename = "submission_id")]
    pub id: String,
    pub client_id: String,
    #[serde(rename = "data")]
    pub payload: serde_json::Value,
    pub status: SubmissionStatus,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn certificate(&self) -> String {
        format!("CERT-{}", self.id)
    }
}

/// Aggregate counts shown on the compliance dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComplianceSummary {
    pub total_submissions: usize,
    pub approved: usize,
    pub pending: usize,
}
