//! Gemini API provider
//!
//! Direct HTTP implementation for the Gemini generateContent API with the
//! audio response modality. Returns raw PCM as delivered in the response's
//! inline data part.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};
use crate::provider::{SpeechRequest, SpeechResponse, TtsProvider};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_VOICE: &str = "Kore";

/// Provider for direct Gemini API calls
pub struct GeminiProvider {
    model: String,
    voice: String,
    api_key: String,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(
        model: &str,
        voice: Option<&str>,
        api_key: String,
        base_url: Option<String>,
    ) -> Result<Self> {
        let client = Client::new();

        Ok(Self {
            model: model.to_string(),
            voice: voice.unwrap_or(DEFAULT_VOICE).to_string(),
            api_key,
            base_url: base_url.unwrap_or_else(|| GEMINI_API_BASE.to_string()),
            client,
        })
    }
}

// Gemini API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    voice_config: VoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[async_trait]
impl TtsProvider for GeminiProvider {
    async fn synthesize(&self, request: SpeechRequest) -> Result<SpeechResponse> {
        // The instruction prefix and the chunk text travel as one text part.
        let prompt = match &request.instructions {
            Some(instructions) => format!("{}\n\n{}", instructions, request.text),
            None => request.text.clone(),
        };

        let voice_name = request
            .voice
            .clone()
            .unwrap_or_else(|| self.voice.clone());

        let api_request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig { voice_name },
                    },
                },
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| TtsError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            // Capture retry-after before the body is consumed
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok());

            let error_text = response.text().await.unwrap_or_default();
            let message =
                if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_text) {
                    error_response.error.message
                } else {
                    error_text
                };

            // 429 and 503 get their own variants for caller-side pacing
            if status.as_u16() == 429 {
                return Err(TtsError::RateLimited { retry_after });
            }
            if status.as_u16() == 503 {
                return Err(TtsError::ServerOverloaded { message });
            }

            return Err(TtsError::ApiError {
                message,
                status_code: Some(status.as_u16()),
            });
        }

        let api_response: GenerateContentResponse =
            response.json().await.map_err(|e| TtsError::ApiError {
                message: format!("Failed to parse response: {}", e),
                status_code: None,
            })?;

        let inline_data = api_response
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.inline_data)
            .ok_or_else(|| TtsError::ApiError {
                message: "Response contained no audio data".to_string(),
                status_code: None,
            })?;

        let audio = BASE64.decode(inline_data.data.as_bytes())?;

        Ok(SpeechResponse {
            audio,
            model: self.model.clone(),
            mime_type: inline_data.mime_type,
        })
    }

    fn name(&self) -> &'static str {
        "Gemini API"
    }

    fn is_available(&self) -> Result<()> {
        // API key was provided in constructor
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let api_request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "Read this aloud.\n\nHello.".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO".to_string()],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: "Kore".to_string(),
                        },
                    },
                },
            },
        };

        let json = serde_json::to_value(&api_request).unwrap();
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Kore"
        );
        assert_eq!(
            json["contents"][0]["parts"][0]["text"],
            "Read this aloud.\n\nHello."
        );
    }

    #[test]
    fn test_response_audio_extraction() {
        let body = r#"{
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": {
                            "mimeType": "audio/L16;codec=pcm;rate=24000",
                            "data": "AAEC"
                        }
                    }]
                }
            }]
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let inline = parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.inline_data)
            .unwrap();
        assert_eq!(
            inline.mime_type.as_deref(),
            Some("audio/L16;codec=pcm;rate=24000")
        );
        assert_eq!(BASE64.decode(inline.data.as_bytes()).unwrap(), [0, 1, 2]);
    }

    #[test]
    fn test_response_without_audio() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "no audio"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        let inline = parsed
            .candidates
            .into_iter()
            .flat_map(|c| c.content.parts)
            .find_map(|p| p.inline_data);
        assert!(inline.is_none());
    }
}
