use std::path::PathBuf;

use crate::chat::GenerationConfig;

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body. One model for every request.
    pub model: String,
}

/// LLM configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"openai"` or `"dummy"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    /// Config for the OpenAI / OpenAI-compatible provider (`[llm.openai]`).
    pub openai: OpenAiConfig,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub log_level: String,
    /// Append logs here instead of stderr (already expanded, no `~`).
    pub log_file: Option<PathBuf>,
    pub llm: LlmConfig,
    /// Initial generation settings; the console can change them per session.
    pub generation: GenerationConfig,
    /// API key from `OPENAI_API_KEY`. Never sourced from TOML.
    pub llm_api_key: Option<String>,
}
