use std::collections::HashMap;
use std::time::Duration;

use parley::presentation::{
    Environment, OrchestrationStrategy, RecognizerProvider, Settings, SettingsError,
};

fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
    Some(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

fn load(pairs: &[(&str, &str)]) -> Result<Settings, SettingsError> {
    Settings::load_from(Environment::Test, vars(pairs))
}

#[test]
fn given_only_required_vars_when_loading_then_applies_defaults() {
    let settings = load(&[("OPENAI_API_KEY", "sk-test"), ("ASSISTANT_ID", "asst_1")]).unwrap();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.assistant.api_key, "sk-test");
    assert_eq!(settings.assistant.assistant_id.as_deref(), Some("asst_1"));
    assert_eq!(settings.assistant.strategy, OrchestrationStrategy::ThreadRun);
    assert_eq!(settings.extraction.max_chars, 10_000);
    assert_eq!(settings.extraction.recognizer, RecognizerProvider::Tesseract);

    let policy = settings.assistant.poll_policy();
    assert_eq!(policy.interval, Duration::from_secs(1));
    assert_eq!(policy.max_attempts, 120);
}

#[test]
fn given_missing_api_key_when_loading_then_fails_before_startup() {
    let result = load(&[("ASSISTANT_ID", "asst_1")]);

    assert!(matches!(result, Err(SettingsError::Missing(_))));
}

#[test]
fn given_thread_run_without_assistant_id_when_loading_then_fails() {
    let result = load(&[("OPENAI_API_KEY", "sk-test")]);

    assert!(matches!(result, Err(SettingsError::Missing(key)) if key.contains("assistant_id")));
}

#[test]
fn given_single_completion_without_assistant_id_when_loading_then_succeeds() {
    let settings = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("APP_ASSISTANT__STRATEGY", "single_completion"),
    ])
    .unwrap();

    assert_eq!(
        settings.assistant.strategy,
        OrchestrationStrategy::SingleCompletion
    );
    assert!(settings.assistant.assistant_id.is_none());
}

#[test]
fn given_port_variable_when_loading_then_overrides_server_port() {
    let settings = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("ASSISTANT_ID", "asst_1"),
        ("PORT", "8080"),
    ])
    .unwrap();

    assert_eq!(settings.server.port, 8080);
}

#[test]
fn given_nested_app_variables_when_loading_then_overrides_sections() {
    let settings = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("ASSISTANT_ID", "asst_1"),
        ("APP_ASSISTANT__POLL_INTERVAL_MS", "250"),
        ("APP_EXTRACTION__MAX_CHARS", "500"),
        ("APP_EXTRACTION__RECOGNIZER", "vision"),
        ("APP_LOGGING__ENABLE_JSON", "true"),
    ])
    .unwrap();

    assert_eq!(
        settings.assistant.poll_policy().interval,
        Duration::from_millis(250)
    );
    assert_eq!(settings.extraction.max_chars, 500);
    assert_eq!(settings.extraction.recognizer, RecognizerProvider::Vision);
    assert!(settings.logging.enable_json);
}

#[test]
fn given_zero_poll_attempts_when_loading_then_rejects_settings() {
    let result = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("ASSISTANT_ID", "asst_1"),
        ("APP_ASSISTANT__MAX_POLL_ATTEMPTS", "0"),
    ]);

    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}

#[test]
fn given_unknown_strategy_when_loading_then_returns_config_error() {
    let result = load(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("APP_ASSISTANT__STRATEGY", "carrier_pigeon"),
    ]);

    assert!(matches!(result, Err(SettingsError::Config(_))));
}
