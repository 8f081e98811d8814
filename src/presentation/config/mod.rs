mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, LlmSettings, LoggingSettings, ServerSettings, Settings, UploadSettings,
};
