use async_trait::async_trait;

use crate::error::Result;

/// Request to send to a speech provider
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    /// The text to speak
    pub text: String,
    /// Natural-language delivery instructions, sent ahead of the text
    pub instructions: Option<String>,
    /// Voice name override (provider-specific)
    pub voice: Option<String>,
}

/// Response from a speech provider
#[derive(Debug, Clone)]
pub struct SpeechResponse {
    /// Raw PCM audio bytes
    pub audio: Vec<u8>,
    /// Model that produced the audio
    pub model: String,
    /// MIME type reported by the provider, e.g. "audio/L16;codec=pcm;rate=24000"
    pub mime_type: Option<String>,
}

/// Trait for speech synthesis providers
#[async_trait]
pub trait TtsProvider: Send + Sync {
    /// Synthesize one request into raw audio bytes
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;

    /// Check if the provider is available (API key set, etc.)
    fn is_available(&self) -> Result<()>;
}
