use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

use super::text_sanitizer::sanitize_extracted_text;

pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, FileLoaderError> {
        let content_type = document.content_type();
        if content_type != ContentType::Text {
            return Err(FileLoaderError::UnsupportedContentType(
                content_type.as_mime().to_string(),
            ));
        }

        let raw = std::str::from_utf8(&document.bytes)
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))?;

        Ok(sanitize_extracted_text(raw))
    }
}
