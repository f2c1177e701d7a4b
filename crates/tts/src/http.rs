use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde_json::json;
use tracing::{debug, warn};

use papercast_capability::{CapabilityError, SpeechSynthesizer};

use crate::config::SpeechConfig;

/// [`SpeechSynthesizer`] backed by a REST synthesis API that returns the
/// audio payload as base64 `audioContent` (the Google Cloud TTS wire
/// shape).
#[derive(Debug)]
pub struct HttpSpeechSynthesizer {
    client: reqwest::Client,
    config: SpeechConfig,
}

impl HttpSpeechSynthesizer {
    /// Create a new synthesizer client with the given configuration.
    pub fn new(config: SpeechConfig) -> Result<Self, CapabilityError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CapabilityError::Configuration(e.to_string()))?;

        Ok(Self { client, config })
    }
}

/// Decode the `audioContent` field of a synthesis response into raw bytes.
fn decode_audio(response: &serde_json::Value) -> Result<Bytes, CapabilityError> {
    let encoded = response
        .get("audioContent")
        .and_then(|c| c.as_str())
        .ok_or_else(|| CapabilityError::Serialization("response has no audioContent".into()))?;

    BASE64
        .decode(encoded)
        .map(Bytes::from)
        .map_err(|e| CapabilityError::Serialization(format!("audioContent is not base64: {e}")))
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Bytes, CapabilityError> {
        let request_body = json!({
            "input": { "text": text },
            "voice": {
                "languageCode": self.config.language_code,
                "name": self.config.voice,
            },
            "audioConfig": { "audioEncoding": "MP3" },
        });

        debug!(endpoint = %self.config.endpoint, voice = %self.config.voice, "sending synthesis request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CapabilityError::Timeout(Duration::from_secs(self.config.timeout_seconds))
                } else {
                    CapabilityError::Connection(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "synthesis API returned error");
            return Err(CapabilityError::ExecutionFailed(format!(
                "HTTP {status}: {body}"
            )));
        }

        let response_json: serde_json::Value = response.json().await.map_err(|e| {
            CapabilityError::Serialization(format!("failed to parse API response: {e}"))
        })?;

        decode_audio(&response_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_audio_happy_path() {
        let response = json!({ "audioContent": BASE64.encode(b"mp3 bytes") });
        let audio = decode_audio(&response).unwrap();
        assert_eq!(&audio[..], b"mp3 bytes");
    }

    #[test]
    fn decode_audio_missing_field() {
        let response = json!({ "error": { "code": 403 } });
        let err = decode_audio(&response).unwrap_err();
        assert!(matches!(err, CapabilityError::Serialization(_)));
    }

    #[test]
    fn decode_audio_invalid_base64() {
        let response = json!({ "audioContent": "!!! not base64 !!!" });
        assert!(decode_audio(&response).is_err());
    }

    #[test]
    fn decode_audio_empty_payload_is_ok_here() {
        // An empty payload decodes fine; rejecting it is the pipeline's
        // call, not the transport's.
        let response = json!({ "audioContent": "" });
        let audio = decode_audio(&response).unwrap();
        assert!(audio.is_empty());
    }
}
