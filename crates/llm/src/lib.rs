pub mod config;
pub mod http;

pub use config::ScriptModelConfig;
pub use http::HttpScriptModel;
