use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{Result, TtsError};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default preset to use when no --model flag is provided
    #[serde(default = "default_preset")]
    pub default_preset: String,

    /// Named voice presets for quick access
    #[serde(default)]
    pub presets: HashMap<String, VoicePreset>,

    /// Provider-specific configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_preset() -> String {
    "gemini-flash".to_string()
}

/// A named voice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoicePreset {
    /// Provider identifier (currently only "gemini")
    pub provider: String,

    /// Model name/identifier for the provider
    pub model: String,

    /// Prebuilt voice name, provider-specific
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

/// Provider-specific configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Custom base URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home =
            std::env::var("HOME").map_err(|_| TtsError::ConfigError("HOME not set".into()))?;
        Ok(PathBuf::from(home).join(".config/cli-programs/tts.toml"))
    }

    /// Get a preset by name
    pub fn get_preset(&self, name: &str) -> Result<&VoicePreset> {
        self.presets
            .get(name)
            .ok_or_else(|| TtsError::InvalidPreset(name.to_string()))
    }

    /// Get provider config by provider name
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut presets = HashMap::new();

        presets.insert(
            "gemini-flash".to_string(),
            VoicePreset {
                provider: "gemini".to_string(),
                model: "gemini-2.5-flash-preview-tts".to_string(),
                voice: Some("Kore".to_string()),
            },
        );
        presets.insert(
            "gemini-pro".to_string(),
            VoicePreset {
                provider: "gemini".to_string(),
                model: "gemini-2.5-pro-preview-tts".to_string(),
                voice: Some("Kore".to_string()),
            },
        );

        Self {
            default_preset: "gemini-flash".to_string(),
            presets,
            providers: HashMap::new(),
        }
    }
}
