//! Shared state for the HTTP layer.

use std::sync::Arc;

use crate::pipeline::openrouter::ChatClient;

/// Context cloned into every handler.
#[derive(Clone)]
pub struct ApiContext {
    pub chat: Arc<dyn ChatClient>,
}

impl ApiContext {
    pub fn new(chat: Arc<dyn ChatClient>) -> Self {
        Self { chat }
    }
}
