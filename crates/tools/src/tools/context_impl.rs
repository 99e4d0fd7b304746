use std::sync::Arc;

use crate::kitchen::{Kitchen, ServerKind};
use crate::tools::context::ToolContext;

/// Context handed to tools by a running server.
#[derive(Clone)]
pub struct KitchenToolContext {
    server_name: String,
    kitchen: Arc<Kitchen>,
}

impl KitchenToolContext {
    pub fn new(kind: ServerKind, kitchen: Arc<Kitchen>) -> Self {
        Self {
            server_name: kind.to_string(),
            kitchen,
        }
    }
}

impl ToolContext for KitchenToolContext {
    fn server_name(&self) -> &str {
        &self.server_name
    }

    fn kitchen(&self) -> &Kitchen {
        &self.kitchen
    }
}
