use std::io::Write;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;
use tempfile::NamedTempFile;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

use super::text_sanitizer::sanitize_extracted_text;

const PARSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Reads the embedded text layer of a PDF. Scanned pages have none and come
/// back empty; the caller decides whether to OCR.
#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    /// One sanitised string per page that carries text.
    fn read_text_layer(path: &Path) -> Result<Vec<String>, FileLoaderError> {
        let mut document = PdfDocument::open(path)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("unparseable PDF: {e}")))?;

        let page_count = document
            .page_count()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("page tree: {e}")))?;

        let mut pages = Vec::new();
        for index in 0..page_count {
            match document.extract_text(index) {
                Ok(raw) => {
                    let text = sanitize_extracted_text(&raw);
                    tracing::trace!(page = index + 1, chars = text.len(), "Page text layer");
                    if !text.is_empty() {
                        pages.push(text);
                    }
                }
                Err(e) => tracing::debug!(page = index + 1, error = %e, "Page text unreadable"),
            }
        }

        Ok(pages)
    }

    fn spool(bytes: &[u8]) -> Result<NamedTempFile, FileLoaderError> {
        let mut spooled = NamedTempFile::new()
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("temp file: {e}")))?;
        spooled
            .write_all(bytes)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("temp file write: {e}")))?;
        Ok(spooled)
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(skip(self, document), fields(declared_name = %document.declared_name))]
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, FileLoaderError> {
        let content_type = document.content_type();
        if content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                content_type.as_mime().to_string(),
            ));
        }

        // pdf_oxide opens from a path; the spooled copy is deleted on drop.
        let spooled = Self::spool(&document.bytes)?;
        let path = spooled.path().to_path_buf();

        let parse = tokio::task::spawn_blocking(move || Self::read_text_layer(&path));
        let pages = tokio::time::timeout(PARSE_TIMEOUT, parse)
            .await
            .map_err(|_| FileLoaderError::ExtractionFailed("PDF parse timed out".to_string()))?
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("parse task: {e}")))??;
        drop(spooled);

        tracing::info!(pages_with_text = pages.len(), "PDF text layer read");

        if pages.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.declared_name.clone()));
        }

        Ok(pages.join("\n\n"))
    }
}
