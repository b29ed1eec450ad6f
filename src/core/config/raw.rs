//! Raw TOML shape, the `serde` target before resolution.
//!
//! Every section is optional; an empty document resolves to the built-in
//! defaults.

use serde::Deserialize;

use crate::chat::generation::{
    DEFAULT_INCLUDE_SOURCES, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};

#[derive(Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub app: RawApp,
    #[serde(default)]
    pub llm: RawLlm,
    #[serde(default)]
    pub generation: RawGeneration,
}

#[derive(Deserialize)]
pub(super) struct RawApp {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Default for RawApp {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            log_file: None,
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    pub provider: String,
    #[serde(default)]
    pub openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self { provider: default_llm_provider(), openai: RawOpenAiConfig::default() }
    }
}

#[derive(Deserialize)]
pub(super) struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
        }
    }
}

#[derive(Deserialize)]
pub(super) struct RawGeneration {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_include_sources")]
    pub include_sources: bool,
}

impl Default for RawGeneration {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            include_sources: default_include_sources(),
        }
    }
}

fn default_app_name() -> String { "med-intel".to_string() }
fn default_log_level() -> String { "warn".to_string() }
fn default_llm_provider() -> String { "openai".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o-mini".to_string() }
fn default_temperature() -> f32 { DEFAULT_TEMPERATURE }
fn default_max_tokens() -> u32 { DEFAULT_MAX_OUTPUT_TOKENS }
fn default_include_sources() -> bool { DEFAULT_INCLUDE_SOURCES }
