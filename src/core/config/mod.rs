//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory (or
//! the file passed with `-f`), then applies `MED_INTEL_LOG_LEVEL` and picks up
//! the `OPENAI_API_KEY` credential.
//!
//! # Module layout
//!
//! - **types**: resolved configuration structs (`Config`, `LlmConfig`, …).
//! - **raw**: TOML deserialization types with serde defaults; private.
//! - **load**: `load`, `load_from`, `EnvOverrides`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from, EnvOverrides};
pub use types::*;

impl Config {
    /// Safe `Config` for tests: dummy LLM, no API key, no external calls.
    pub fn test_default() -> Self {
        Self {
            app_name: "test".into(),
            log_level: "info".into(),
            log_file: None,
            llm: LlmConfig {
                provider: "dummy".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                },
            },
            generation: crate::chat::GenerationConfig::default(),
            llm_api_key: None,
        }
    }
}
