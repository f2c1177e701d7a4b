use serde::Deserialize;

/// Configuration for the HTTP script model.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptModelConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,

    /// Bearer token for the API.
    pub api_key: String,

    /// Model identifier.
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in each generated response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_seconds() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_in() {
        let config: ScriptModelConfig = serde_json::from_str(
            r#"{"endpoint":"https://api.example.com/v1/chat/completions","api_key":"k","model":"m"}"#,
        )
        .unwrap();
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.timeout_seconds, 60);
    }
}
