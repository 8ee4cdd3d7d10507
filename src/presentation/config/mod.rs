mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AssistantSettings, ExtractionSettings, LoggingSettings, OrchestrationStrategy,
    RecognizerProvider, ServerSettings, Settings, SettingsError,
};
