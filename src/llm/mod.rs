//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations, chosen
//! once from config by [`providers::build`]. The `complete` method is
//! `async fn` on the enum so callers need no trait-object machinery.

pub mod providers;

use thiserror::Error;

use crate::chat::{GenerationConfig, Message};

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    /// No API key configured; raised before any network I/O.
    #[error("no API key configured")]
    MissingCredential,
    /// Transport failure, HTTP error status or unusable response body.
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
}

impl LlmProvider {
    /// Send the full ordered history with the generation settings and
    /// return the assistant text. One attempt, no retries.
    pub async fn complete(
        &self,
        messages: &[Message],
        generation: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(messages).await,
            LlmProvider::OpenAiCompatible(p) => p.complete(messages, generation).await,
        }
    }

    /// Short label for logs and the `/settings` view.
    pub fn describe(&self) -> String {
        match self {
            LlmProvider::Dummy(_) => "dummy".to_string(),
            LlmProvider::OpenAiCompatible(p) => format!("openai ({})", p.model()),
        }
    }
}
