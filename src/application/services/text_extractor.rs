use std::sync::Arc;

use crate::application::ports::{FileLoader, FileLoaderError, OpticalRecognizer, RecognitionError};
use crate::domain::{ContentType, ExtractionResult, SourceMethod, UploadedDocument};

pub const DEFAULT_MAX_CHARS: usize = 10_000;

/// Structured parse first, optical recognition when that yields nothing.
pub struct TextExtractor {
    structured: Arc<dyn FileLoader>,
    recognizer: Arc<dyn OpticalRecognizer>,
    max_chars: usize,
}

impl TextExtractor {
    pub fn new(
        structured: Arc<dyn FileLoader>,
        recognizer: Arc<dyn OpticalRecognizer>,
        max_chars: usize,
    ) -> Self {
        Self {
            structured,
            recognizer,
            max_chars,
        }
    }

    #[tracing::instrument(
        skip(self, document),
        fields(
            declared_name = %document.declared_name,
            media_type = %document.media_type,
            size_bytes = document.size_bytes(),
        )
    )]
    pub async fn extract(
        &self,
        document: &UploadedDocument,
    ) -> Result<ExtractionResult, ExtractionError> {
        let content_type = document.content_type();

        if matches!(content_type, ContentType::Pdf | ContentType::Text) {
            match self.structured.extract_text(document).await {
                Ok(text) => {
                    let parsed =
                        ExtractionResult::new(text.trim().to_string(), SourceMethod::StructuredParse);
                    if let Some(result) = parsed {
                        return Ok(self.bounded(result));
                    }
                    tracing::info!("Structured parse returned no text, falling back to OCR");
                }
                Err(FileLoaderError::NoTextFound(_)) => {
                    tracing::info!("Document has no text layer, falling back to OCR");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Structured parse failed, falling back to OCR");
                }
            }

            // Plain text has no pixels; an empty parse is the final answer.
            if content_type == ContentType::Text {
                return Err(ExtractionError::NoTextFound(document.declared_name.clone()));
            }
        }

        let recognized = match self.recognizer.recognize(&document.bytes, content_type).await {
            Ok(text) => text,
            Err(RecognitionError::UnreadableInput(reason)) => {
                tracing::warn!(
                    %reason,
                    content_type = content_type.as_mime(),
                    "OCR could not read input"
                );
                return Err(match content_type {
                    ContentType::Unknown | ContentType::Text => {
                        ExtractionError::NoTextFound(document.declared_name.clone())
                    }
                    _ => ExtractionError::UnsupportedInput(format!(
                        "{} is not a readable {}: {reason}",
                        document.declared_name,
                        content_type.as_mime()
                    )),
                });
            }
            Err(e) => return Err(ExtractionError::RecognitionFailed(e.to_string())),
        };

        let result = ExtractionResult::new(
            recognized.trim().to_string(),
            SourceMethod::OpticalRecognition,
        )
        .ok_or_else(|| ExtractionError::NoTextFound(document.declared_name.clone()))?;

        Ok(self.bounded(result))
    }

    fn bounded(&self, result: ExtractionResult) -> ExtractionResult {
        let result = result.truncated(self.max_chars);
        tracing::info!(
            source_method = %result.source_method(),
            chars = result.char_count(),
            "Text extraction complete"
        );
        result
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),
    #[error("no text found in {0}")]
    NoTextFound(String),
    #[error("optical recognition failed: {0}")]
    RecognitionFailed(String),
}
