use std::sync::Arc;

use crate::config::Config;
use crate::rate_limit::SubmissionRateLimiter;
use crate::registry::SubmissionRegistry;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub registry: SubmissionRegistry,
    pub submission_limiter: SubmissionRateLimiter,
}
