//! Mock speech provider for testing
//!
//! Provides a configurable mock provider that can simulate failures and
//! successful synthesis without touching the network.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, TtsError};
use crate::provider::{SpeechRequest, SpeechResponse, TtsProvider};

/// A mock provider for testing pipeline and failure behavior
pub struct MockProvider {
    /// Number of times to fail before succeeding (0 = always succeed)
    fail_count: AtomicUsize,
    /// Current call count
    call_count: AtomicUsize,
    /// Error to return on failure (None = always succeed)
    fail_with: Mutex<Option<TtsError>>,
    /// Audio bytes to return on success
    success_audio: Vec<u8>,
    /// Provider name for display
    name: &'static str,
}

impl MockProvider {
    /// Create a provider that fails `n` times with the given error, then succeeds
    pub fn fails_then_succeeds(n: usize, error: TtsError, audio: &[u8]) -> Self {
        Self {
            fail_count: AtomicUsize::new(n),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            success_audio: audio.to_vec(),
            name: "mock",
        }
    }

    /// Create a provider that always fails with the given error
    pub fn always_fails(error: TtsError) -> Self {
        Self {
            fail_count: AtomicUsize::new(usize::MAX),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(Some(error)),
            success_audio: Vec::new(),
            name: "mock",
        }
    }

    /// Create a provider that always succeeds with the given audio bytes
    pub fn always_succeeds(audio: &[u8]) -> Self {
        Self {
            fail_count: AtomicUsize::new(0),
            call_count: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            success_audio: audio.to_vec(),
            name: "mock",
        }
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Set a custom provider name
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

#[async_trait]
impl TtsProvider for MockProvider {
    async fn synthesize(&self, _request: SpeechRequest) -> Result<SpeechResponse> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);
        let fail_count = self.fail_count.load(Ordering::SeqCst);

        if call_num < fail_count {
            // Should fail on this call
            let error = self.fail_with.lock().unwrap();
            if let Some(err) = error.as_ref() {
                return Err(clone_error(err));
            }
        }

        // Success
        Ok(SpeechResponse {
            audio: self.success_audio.clone(),
            model: "mock-model".to_string(),
            mime_type: Some("audio/L16;codec=pcm;rate=24000".to_string()),
        })
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}

/// Clone a TtsError (needed because TtsError doesn't implement Clone)
fn clone_error(err: &TtsError) -> TtsError {
    match err {
        TtsError::ServerOverloaded { message } => TtsError::ServerOverloaded {
            message: message.clone(),
        },
        TtsError::MissingApiKey { provider, env_var } => TtsError::MissingApiKey {
            provider: provider.clone(),
            env_var: env_var.clone(),
        },
        TtsError::RateLimited { retry_after } => TtsError::RateLimited {
            retry_after: *retry_after,
        },
        TtsError::ApiError {
            message,
            status_code,
        } => TtsError::ApiError {
            message: message.clone(),
            status_code: *status_code,
        },
        TtsError::ConfigError(s) => TtsError::ConfigError(s.clone()),
        TtsError::InvalidPreset(s) => TtsError::InvalidPreset(s.clone()),
        // Decode, Io and Toml errors can't be cloned; return a generic error
        TtsError::Decode(_) => TtsError::ConfigError("Decode error (mock)".to_string()),
        TtsError::Io(_) => TtsError::ConfigError("IO error (mock)".to_string()),
        TtsError::TomlParse(_) => TtsError::ConfigError("TOML parse error (mock)".to_string()),
        TtsError::TomlSerialize(_) => {
            TtsError::ConfigError("TOML serialize error (mock)".to_string())
        }
    }
}
