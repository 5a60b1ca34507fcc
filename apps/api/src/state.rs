use std::sync::Arc;

use crate::llm_client::ChatModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable chat model. Production wires in GeminiClient; tests swap in
    /// scripted implementations.
    pub llm: Arc<dyn ChatModel>,
}
