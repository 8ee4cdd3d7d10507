use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File};
use serde::Deserialize;

use crate::application::services::PollPolicy;

use super::Environment;

/// Variables honoured verbatim, outside the `APP_` namespace.
const WELL_KNOWN_VARS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "assistant.api_key"),
    ("ASSISTANT_ID", "assistant.assistant_id"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub assistant: AssistantSettings,
    pub extraction: ExtractionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrchestrationStrategy {
    ThreadRun,
    SingleCompletion,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantSettings {
    pub api_key: String,
    pub assistant_id: Option<String>,
    pub base_url: String,
    pub strategy: OrchestrationStrategy,
    pub chat_model: String,
    pub system_instruction: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
    pub request_timeout_secs: u64,
}

impl AssistantSettings {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.max_poll_attempts,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognizerProvider {
    Tesseract,
    Vision,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub max_chars: usize,
    pub recognizer: RecognizerProvider,
    pub tesseract_path: Option<String>,
    pub tesseract_language: Option<String>,
    pub vision_base_url: Option<String>,
    pub vision_model: Option<String>,
    pub vision_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

impl Settings {
    /// Reads `appsettings.{env}.toml`, then `APP_*` variables, then the
    /// well-known variables, and validates the result.
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        Self::load_from(environment, None)
    }

    /// Same as [`Settings::load`], with `vars` standing in for the process environment.
    pub fn load_from(
        environment: Environment,
        vars: Option<HashMap<String, String>>,
    ) -> Result<Self, SettingsError> {
        let lookup = |key: &str| match &vars {
            Some(map) => map.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        let mut builder = Self::defaults()?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.config_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars.clone()),
            );

        for &(var, key) in WELL_KNOWN_VARS {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, SettingsError> {
        Ok(Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.upload_dir", "uploads")?
            .set_default("server.max_upload_bytes", 25 * 1024 * 1024)?
            .set_default("assistant.api_key", "")?
            .set_default(
                "assistant.base_url",
                crate::infrastructure::llm::DEFAULT_OPENAI_BASE_URL,
            )?
            .set_default("assistant.strategy", "thread_run")?
            .set_default("assistant.chat_model", "gpt-4o-mini")?
            .set_default(
                "assistant.system_instruction",
                crate::application::services::DEFAULT_SYSTEM_INSTRUCTION,
            )?
            .set_default("assistant.poll_interval_ms", 1000)?
            .set_default("assistant.max_poll_attempts", 120)?
            .set_default("assistant.request_timeout_secs", 60)?
            .set_default(
                "extraction.max_chars",
                crate::application::services::DEFAULT_MAX_CHARS as u64,
            )?
            .set_default("extraction.recognizer", "tesseract")?
            .set_default("logging.level", "info,parley=debug")?
            .set_default("logging.enable_json", false)?)
    }

    /// Checked before any remote client or orchestrator is built.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.assistant.api_key.trim().is_empty() {
            return Err(SettingsError::Missing("assistant.api_key (OPENAI_API_KEY)"));
        }

        let has_assistant_id = self
            .assistant
            .assistant_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if self.assistant.strategy == OrchestrationStrategy::ThreadRun && !has_assistant_id {
            return Err(SettingsError::Missing(
                "assistant.assistant_id (ASSISTANT_ID)",
            ));
        }

        if self.assistant.max_poll_attempts == 0 {
            return Err(SettingsError::Invalid(
                "assistant.max_poll_attempts must be at least 1".to_string(),
            ));
        }

        if self.extraction.max_chars == 0 {
            return Err(SettingsError::Invalid(
                "extraction.max_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
