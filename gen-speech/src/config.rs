//! gen-speech configuration management.

use crate::cost::Pricing;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_DELAY_SECS: u64 = 120;
const DEFAULT_MAX_TOKENS: usize = 7000;
const DEFAULT_INSTRUCTIONS: &str =
    "Read the following text aloud in a clear, natural narration voice:";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenSpeechConfig {
    /// Default voice preset name from the TTS client config
    #[serde(default)]
    pub preset: Option<String>,

    /// Default voice name override
    #[serde(default)]
    pub voice: Option<String>,

    /// Delivery instructions sent ahead of each chunk
    #[serde(default = "default_instructions")]
    pub instructions: String,

    /// Seconds to wait between API calls
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Maximum token budget per chunk
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Pricing constants for cost estimation
    #[serde(default)]
    pub pricing: Pricing,
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.to_string()
}

fn default_delay_secs() -> u64 {
    DEFAULT_DELAY_SECS
}

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

impl Default for GenSpeechConfig {
    fn default() -> Self {
        Self {
            preset: None,
            voice: None,
            instructions: default_instructions(),
            delay_secs: default_delay_secs(),
            max_tokens: default_max_tokens(),
            pricing: Pricing::default(),
        }
    }
}

impl GenSpeechConfig {
    /// Get the config file path: ~/.config/cli-programs/gen-speech.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("gen-speech.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: GenSpeechConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenSpeechConfig::default();
        assert_eq!(config.delay_secs, 120);
        assert_eq!(config.max_tokens, 7000);
        assert!(config.preset.is_none());
        assert!(config.voice.is_none());
        assert!(!config.instructions.is_empty());
    }

    #[test]
    fn test_config_path() {
        let path = GenSpeechConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/gen-speech.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
voice = "Puck"
delay_secs = 30
max_tokens = 5000

[pricing]
input_price_per_million = 1.0
"#;
        let config: GenSpeechConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voice, Some("Puck".to_string()));
        assert_eq!(config.delay_secs, 30);
        assert_eq!(config.max_tokens, 5000);
        assert_eq!(config.pricing.input_price_per_million, 1.0);
        // Unspecified pricing fields keep their defaults
        assert_eq!(config.pricing.output_price_per_million, 10.0);
    }

    #[test]
    fn test_parse_empty_config() {
        let toml_str = "";
        let config: GenSpeechConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.delay_secs, 120);
        assert_eq!(config.max_tokens, 7000);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = GenSpeechConfig::default();
        config.voice = Some("Kore".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: GenSpeechConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.voice, config.voice);
        assert_eq!(parsed.delay_secs, config.delay_secs);
    }
}
