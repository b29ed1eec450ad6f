//! Dummy LLM provider: echoes the latest user message prefixed with `[echo]`.
//! Used for offline runs and for exercising the full turn without an API key.

use crate::chat::{Message, Role};
use crate::llm::ProviderError;

#[derive(Debug, Clone)]
pub struct DummyProvider;

impl DummyProvider {
    pub async fn complete(&self, messages: &[Message]) -> Result<String, ProviderError> {
        let last_user = messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::User)
            .map(|m| m.content())
            .unwrap_or_default();
        Ok(format!("[echo] {last_user}"))
    }
}
