//! Configuration loading with env-var overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bootstrap::logger;
use crate::chat::GenerationConfig;
use crate::error::AppError;

use super::raw::RawConfig;
use super::types::*;

const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment values that override or complete the TOML.
/// Tests build this directly instead of mutating env vars.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    /// `MED_INTEL_LOG_LEVEL`
    pub log_level: Option<String>,
    /// `OPENAI_API_KEY`
    pub api_key: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("MED_INTEL_LOG_LEVEL").ok(),
            // An empty key counts as missing.
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Load config from the given path, or `config/default.toml`, then apply env-var overrides.
///
/// An explicit path must exist. Without one, a missing `config/default.toml`
/// falls back to the built-in defaults.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let overrides = EnvOverrides::from_env();

    if let Some(path) = config_path {
        return load_from(Path::new(path), &overrides);
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        load_from(default_path, &overrides)
    } else {
        resolve(RawConfig::default(), &overrides)
    }
}

/// Internal loader: accepts an explicit path and resolved overrides.
pub fn load_from(path: &Path, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, overrides)
}

fn resolve(parsed: RawConfig, overrides: &EnvOverrides) -> Result<Config, AppError> {
    let app = parsed.app;
    let log_level = overrides.log_level.clone().unwrap_or(app.log_level);
    // EnvFilter would take an unknown word as a target name and log nothing.
    logger::parse_level(&log_level)
        .map_err(|e| AppError::Config(format!("[app] log_level: {e}")))?;

    let raw_gen = parsed.generation;
    let generation = GenerationConfig::new(raw_gen.temperature, raw_gen.max_tokens, raw_gen.include_sources)
        .map_err(|e| AppError::Config(format!("[generation]: {e}")))?;

    Ok(Config {
        app_name: app.name,
        log_level,
        log_file: app.log_file.as_deref().map(expand_home),
        llm: LlmConfig {
            provider: parsed.llm.provider,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
            },
        },
        generation,
        llm_api_key: overrides.api_key.clone(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[app]
name = "med-intel-test"
log_level = "info"
log_file = "/tmp/med-intel.log"

[llm]
default = "dummy"

[llm.openai]
api_base_url = "http://localhost:11434/v1/chat/completions"
model = "llama3"

[generation]
temperature = 0.5
max_tokens = 512
include_sources = false
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_full_config() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(f.path(), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.app_name, "med-intel-test");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/med-intel.log")));
        assert_eq!(cfg.llm.provider, "dummy");
        assert_eq!(cfg.llm.openai.model, "llama3");
        assert_eq!(cfg.generation.temperature(), 0.5);
        assert_eq!(cfg.generation.max_output_tokens(), 512);
        assert!(!cfg.generation.include_source_suggestions());
        assert!(cfg.llm_api_key.is_none());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), &EnvOverrides::default()).unwrap();
        assert_eq!(cfg.app_name, "med-intel");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.llm.openai.model, "gpt-4o-mini");
        assert_eq!(cfg.generation, GenerationConfig::default());
        assert!(cfg.log_file.is_none());
    }

    #[test]
    fn out_of_range_generation_rejected() {
        let f = write_toml("[generation]\nmax_tokens = 4096\n");
        let err = load_from(f.path(), &EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("[generation]"));
    }

    #[test]
    fn unknown_log_level_rejected() {
        let f = write_toml("[app]\nlog_level = \"verbose\"\n");
        let err = load_from(f.path(), &EnvOverrides::default()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("verbose"));

        let f = write_toml("");
        let overrides = EnvOverrides { log_level: Some("loud".into()), api_key: None };
        assert!(load_from(f.path(), &overrides).is_err());
    }

    #[test]
    fn malformed_toml_errors() {
        let f = write_toml("[app\nname = ");
        let err = load_from(f.path(), &EnvOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(Path::new("/nonexistent/config.toml"), &EnvOverrides::default());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("config error"));
    }

    #[test]
    fn overrides_apply() {
        let f = write_toml(FULL_TOML);
        let overrides = EnvOverrides {
            log_level: Some("debug".into()),
            api_key: Some("sk-test".into()),
        };
        let cfg = load_from(f.path(), &overrides).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.llm_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.med-intel.log");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".med-intel.log"));
    }

    #[test]
    fn absolute_path_unchanged() {
        assert_eq!(expand_home("/absolute/path"), PathBuf::from("/absolute/path"));
    }
}
