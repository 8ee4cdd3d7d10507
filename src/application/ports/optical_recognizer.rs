use async_trait::async_trait;

use crate::domain::ContentType;

/// Derives text from rasterised content. PDFs are rendered page by page,
/// images are read directly, unknown content is attempted as an image.
#[async_trait]
pub trait OpticalRecognizer: Send + Sync {
    async fn recognize(
        &self,
        data: &[u8],
        content_type: ContentType,
    ) -> Result<String, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("input cannot be decoded as an image or document: {0}")]
    UnreadableInput(String),
    #[error("recognition engine failed: {0}")]
    EngineFailed(String),
    #[error("recognition api request failed: {0}")]
    ApiRequestFailed(String),
}
