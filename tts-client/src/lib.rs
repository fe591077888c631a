//! Shared speech-synthesis client library for the gen-speech workspace
//!
//! Provides a unified interface over hosted generative-audio APIs:
//! - Gemini (direct HTTP, audio response modality)
//! - Mock (tests)

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::{Config, ProviderConfig, VoicePreset};
pub use error::{Result, TtsError};
pub use provider::{SpeechRequest, SpeechResponse, TtsProvider};
pub use providers::{GeminiProvider, MockProvider, ProviderKind, get_provider};
