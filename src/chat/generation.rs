//! Per-request generation settings.
//!
//! Built from `[generation]` at startup and adjusted by console commands.
//! Never stored in the message history.

use std::ops::RangeInclusive;

use thiserror::Error;

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const MAX_OUTPUT_TOKENS_RANGE: RangeInclusive<u32> = 256..=1200;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 700;
pub const DEFAULT_INCLUDE_SOURCES: bool = true;

#[derive(Debug, Error, PartialEq)]
pub enum SettingError {
    #[error("temperature must be within 0.0..=1.0, got {0}")]
    Temperature(f32),
    #[error("max tokens must be within 256..=1200, got {0}")]
    MaxOutputTokens(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    include_source_suggestions: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            include_source_suggestions: DEFAULT_INCLUDE_SOURCES,
        }
    }
}

impl GenerationConfig {
    pub fn new(temperature: f32, max_output_tokens: u32, include_source_suggestions: bool) -> Result<Self, SettingError> {
        let mut cfg = Self { include_source_suggestions, ..Self::default() };
        cfg.set_temperature(temperature)?;
        cfg.set_max_output_tokens(max_output_tokens)?;
        Ok(cfg)
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    pub fn include_source_suggestions(&self) -> bool {
        self.include_source_suggestions
    }

    // NaN fails the range check.
    pub fn set_temperature(&mut self, value: f32) -> Result<(), SettingError> {
        if !TEMPERATURE_RANGE.contains(&value) {
            return Err(SettingError::Temperature(value));
        }
        self.temperature = value;
        Ok(())
    }

    pub fn set_max_output_tokens(&mut self, value: u32) -> Result<(), SettingError> {
        if !MAX_OUTPUT_TOKENS_RANGE.contains(&value) {
            return Err(SettingError::MaxOutputTokens(value));
        }
        self.max_output_tokens = value;
        Ok(())
    }

    pub fn set_include_source_suggestions(&mut self, on: bool) {
        self.include_source_suggestions = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let cfg = GenerationConfig::default();
        assert!(TEMPERATURE_RANGE.contains(&cfg.temperature()));
        assert!(MAX_OUTPUT_TOKENS_RANGE.contains(&cfg.max_output_tokens()));
        assert!(cfg.include_source_suggestions());
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(GenerationConfig::new(0.0, 256, false).is_ok());
        assert!(GenerationConfig::new(1.0, 1200, true).is_ok());
    }

    #[test]
    fn out_of_range_rejected_without_change() {
        let mut cfg = GenerationConfig::default();
        assert_eq!(cfg.set_temperature(1.5), Err(SettingError::Temperature(1.5)));
        assert!(cfg.set_temperature(f32::NAN).is_err());
        assert_eq!(cfg.set_max_output_tokens(255), Err(SettingError::MaxOutputTokens(255)));
        assert_eq!(cfg, GenerationConfig::default());
    }
}
