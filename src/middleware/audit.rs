/// Record an audit event. This is called explicitly in handlers after mutations.
pub fn log_event(action: &str, submission_id: &str, details: Option<serde_json::Value>) {
    match details {
        Some(details) => tracing::info!(
            target: "audit",
            action,
            submission_id,
            details = %details,
            "audit event"
        ),
        None => tracing::info!(target: "audit", action, submission_id, "audit event"),
    }
}
