pub mod submission;

pub use submission::{ComplianceSummary, Submission, SubmissionStatus};
