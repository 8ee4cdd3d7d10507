use std::sync::Arc;

use crate::application::ports::OpticalRecognizer;
use crate::presentation::config::{ExtractionSettings, RecognizerProvider};

use super::tesseract_recognizer::{DEFAULT_TESSERACT_BINARY, DEFAULT_TESSERACT_LANGUAGE};
use super::{TesseractRecognizer, VisionModelRecognizer};

#[derive(Debug, thiserror::Error)]
pub enum RecognizerFactoryError {
    #[error("vision_base_url is required for the vision recognizer")]
    MissingVisionBaseUrl,
    #[error("vision_model is required for the vision recognizer")]
    MissingVisionModel,
    #[error("recognizer initialization failed: {0}")]
    InitializationFailed(String),
}

pub struct RecognizerFactory;

impl RecognizerFactory {
    /// `fallback_api_key` is used for the vision recognizer when no dedicated key is set.
    pub fn create(
        settings: &ExtractionSettings,
        fallback_api_key: &str,
    ) -> Result<Arc<dyn OpticalRecognizer>, RecognizerFactoryError> {
        match settings.recognizer {
            RecognizerProvider::Tesseract => {
                let binary = settings
                    .tesseract_path
                    .as_deref()
                    .unwrap_or(DEFAULT_TESSERACT_BINARY);
                let language = settings
                    .tesseract_language
                    .as_deref()
                    .unwrap_or(DEFAULT_TESSERACT_LANGUAGE);
                tracing::info!(binary, language, "Using tesseract recognizer");
                Ok(Arc::new(TesseractRecognizer::new(binary, language)))
            }
            RecognizerProvider::Vision => {
                let base_url = settings
                    .vision_base_url
                    .as_deref()
                    .ok_or(RecognizerFactoryError::MissingVisionBaseUrl)?;
                let model = settings
                    .vision_model
                    .as_deref()
                    .ok_or(RecognizerFactoryError::MissingVisionModel)?;
                let api_key = settings
                    .vision_api_key
                    .as_deref()
                    .unwrap_or(fallback_api_key);
                tracing::info!(model, base_url, "Using vision model recognizer");
                let recognizer = VisionModelRecognizer::new(base_url, model, api_key)
                    .map_err(|e| RecognizerFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(recognizer))
            }
        }
    }
}
