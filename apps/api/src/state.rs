use std::sync::Arc;

use crate::config::Config;
use crate::grading::{ResumeScorer, WeightedScorer};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable scorer. Default: WeightedScorer.
    pub scorer: Arc<dyn ResumeScorer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            scorer: Arc::new(WeightedScorer),
        }
    }
}
