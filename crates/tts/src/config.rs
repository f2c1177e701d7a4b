use serde::Deserialize;

/// Configuration for the HTTP speech synthesizer.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Synthesis endpoint URL.
    pub endpoint: String,

    /// Bearer token for the API.
    pub api_key: String,

    /// BCP-47 language code of the voice.
    #[serde(default = "default_language_code")]
    pub language_code: String,

    /// Named voice to synthesize with.
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_language_code() -> String {
    "en-US".to_owned()
}

fn default_voice() -> String {
    "en-US-Wavenet-D".to_owned()
}

fn default_timeout_seconds() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in() {
        let config: SpeechConfig = serde_json::from_str(
            r#"{"endpoint":"https://tts.example.com/v1/text:synthesize","api_key":"k"}"#,
        )
        .unwrap();
        assert_eq!(config.language_code, "en-US");
        assert_eq!(config.voice, "en-US-Wavenet-D");
        assert_eq!(config.timeout_seconds, 60);
    }
}
