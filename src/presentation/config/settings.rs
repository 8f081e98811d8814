use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub llm: LlmSettings,
    pub logging: LoggingSettings,
    pub upload: UploadSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// When unset the service runs against the in-memory record store.
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl Settings {
    /// Layered configuration: built-in defaults, then an optional
    /// `appsettings.{env}` file, then `APP__`-prefixed environment
    /// variables (e.g. `APP__LLM__API_KEY`).
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 5)?
            .set_default("llm.api_key", "")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.temperature", 0.0)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .set_default("upload.max_file_size_mb", 25)?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str()))
                    .required(false),
            )
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
