//! Speech provider implementations

mod gemini;
pub mod mock;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;

use crate::config::{ProviderConfig, VoicePreset};
use crate::error::{Result, TtsError};
use crate::provider::TtsProvider;

/// Supported provider types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
}

impl ProviderKind {
    /// Parse provider kind from string
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            _ => Err(TtsError::ConfigError(format!("Unknown provider: {}", s))),
        }
    }

    /// Get the environment variable name for this provider's API key
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
        }
    }
}

/// Create a provider instance from a preset and optional config
pub fn get_provider(
    preset: &VoicePreset,
    provider_config: Option<&ProviderConfig>,
) -> Result<Box<dyn TtsProvider>> {
    let kind = ProviderKind::from_str(&preset.provider)?;

    match kind {
        ProviderKind::Gemini => {
            let api_key = get_api_key(provider_config, "GEMINI_API_KEY", "Gemini")?;
            let base_url = provider_config.and_then(|c| c.base_url.clone());
            Ok(Box::new(GeminiProvider::new(
                &preset.model,
                preset.voice.as_deref(),
                api_key,
                base_url,
            )?))
        }
    }
}

/// Get API key from config or environment variable
fn get_api_key(
    config: Option<&ProviderConfig>,
    env_var: &str,
    provider_name: &str,
) -> Result<String> {
    // Check config first
    if let Some(key) = config.and_then(|c| c.api_key.clone()) {
        return Ok(key);
    }

    // Fall back to environment variable
    std::env::var(env_var).map_err(|_| TtsError::MissingApiKey {
        provider: provider_name.to_string(),
        env_var: env_var.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!(ProviderKind::from_str("gemini").unwrap(), ProviderKind::Gemini);
        assert_eq!(ProviderKind::from_str("Google").unwrap(), ProviderKind::Gemini);
        assert!(ProviderKind::from_str("espeak").is_err());
    }

    #[test]
    fn test_env_var() {
        assert_eq!(ProviderKind::Gemini.env_var(), "GEMINI_API_KEY");
    }

    #[test]
    fn test_api_key_from_config() {
        let config = ProviderConfig {
            api_key: Some("from-config".to_string()),
            base_url: None,
        };
        let key = get_api_key(Some(&config), "GEN_SPEECH_TEST_UNSET_VAR", "Gemini").unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_api_key_missing() {
        let err = get_api_key(None, "GEN_SPEECH_TEST_UNSET_VAR", "Gemini").unwrap_err();
        match err {
            TtsError::MissingApiKey { provider, env_var } => {
                assert_eq!(provider, "Gemini");
                assert_eq!(env_var, "GEN_SPEECH_TEST_UNSET_VAR");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
