//! LLM provider implementations.
//!
//! `build(config, api_key)` is the factory, called once at startup.
//! Adding a new backend = new module + new match arm.

pub mod dummy;
pub mod openai_compatible;

use crate::config::LlmConfig;
use crate::llm::{LlmProvider, ProviderError};

/// Construct a `LlmProvider` from config and an optional API key.
///
/// `api_key` is sourced from `OPENAI_API_KEY` (never TOML). A missing key
/// does not fail here: the OpenAI provider reports `MissingCredential` on
/// each turn so the console stays usable.
pub fn build(config: &LlmConfig, api_key: Option<String>) -> Result<LlmProvider, ProviderError> {
    match config.provider.as_str() {
        "dummy" => Ok(LlmProvider::Dummy(dummy::DummyProvider)),
        "openai" | "openai-compatible" => {
            let oai = &config.openai;
            let p = openai_compatible::OpenAiCompatibleProvider::new(
                oai.api_base_url.clone(),
                oai.model.clone(),
                api_key,
            )?;
            Ok(LlmProvider::OpenAiCompatible(p))
        }
        _ => Err(ProviderError::UnknownProvider(config.provider.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_dummy() {
        let cfg = Config::test_default();
        assert!(matches!(build(&cfg.llm, None), Ok(LlmProvider::Dummy(_))));
    }

    #[test]
    fn builds_openai_without_key() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "openai".into();
        let p = build(&cfg.llm, None).unwrap();
        assert_eq!(p.describe(), "openai (test-model)");
    }

    #[test]
    fn unknown_provider_errors() {
        let mut cfg = Config::test_default();
        cfg.llm.provider = "legacy-sdk".into();
        let err = build(&cfg.llm, None).unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(p) if p == "legacy-sdk"));
    }
}
