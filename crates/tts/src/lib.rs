pub mod config;
pub mod http;

pub use config::SpeechConfig;
pub use http::HttpSpeechSynthesizer;
