//! Application State

use std::sync::Arc;

use crate::application::SynthesisOrchestrator;

/// Shared state behind the HTTP handlers.
pub struct AppState {
    pub orchestrator: Arc<SynthesisOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<SynthesisOrchestrator>) -> Self {
        Self { orchestrator }
    }
}
