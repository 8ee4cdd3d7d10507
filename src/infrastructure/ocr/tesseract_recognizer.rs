use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{OpticalRecognizer, RecognitionError};
use crate::domain::ContentType;
use crate::infrastructure::text_processing::sanitize_extracted_text;

use super::page_images::{PageImage, page_images};

pub const DEFAULT_TESSERACT_BINARY: &str = "tesseract";
pub const DEFAULT_TESSERACT_LANGUAGE: &str = "eng";
const PAGE_TIMEOUT: Duration = Duration::from_secs(60);

/// Messages leptonica/tesseract print when the input is not an image they can read.
const UNREADABLE_MARKERS: &[&str] = &[
    "Error in pixRead",
    "Unsupported image type",
    "Image file",
    "cannot be read",
];

/// Runs the `tesseract` CLI once per page image.
pub struct TesseractRecognizer {
    binary: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    async fn recognize_page(
        &self,
        page: &PageImage,
        index: usize,
    ) -> Result<String, RecognitionError> {
        let mut image_file = tempfile::Builder::new()
            .prefix("parley-ocr-")
            .suffix(&format!(".{}", page.format.extension()))
            .tempfile()
            .map_err(|e| RecognitionError::EngineFailed(format!("temp file: {e}")))?;

        image_file
            .write_all(&page.bytes)
            .map_err(|e| RecognitionError::EngineFailed(format!("temp file write: {e}")))?;
        image_file
            .flush()
            .map_err(|e| RecognitionError::EngineFailed(format!("temp file flush: {e}")))?;

        let output = tokio::time::timeout(
            PAGE_TIMEOUT,
            Command::new(&self.binary)
                .arg(image_file.path())
                .arg("stdout")
                .arg("-l")
                .arg(&self.language)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            RecognitionError::EngineFailed(format!("tesseract timed out on page {index}"))
        })?
        .map_err(|e| {
            RecognitionError::EngineFailed(format!(
                "failed to run {}: {e}",
                self.binary.display()
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if UNREADABLE_MARKERS.iter().any(|m| stderr.contains(m)) {
                return Err(RecognitionError::UnreadableInput(stderr.trim().to_string()));
            }
            return Err(RecognitionError::EngineFailed(format!(
                "tesseract exited with {} on page {index}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_TESSERACT_BINARY, DEFAULT_TESSERACT_LANGUAGE)
    }
}

#[async_trait]
impl OpticalRecognizer for TesseractRecognizer {
    #[tracing::instrument(
        skip(self, data),
        fields(content_type = content_type.as_mime(), engine = "tesseract")
    )]
    async fn recognize(
        &self,
        data: &[u8],
        content_type: ContentType,
    ) -> Result<String, RecognitionError> {
        let pages = page_images(data, content_type).await?;
        let mut page_texts = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            let text = sanitize_extracted_text(&self.recognize_page(page, index).await?);
            if !text.is_empty() {
                page_texts.push(text);
            }
        }

        tracing::info!(
            pages = pages.len(),
            pages_with_text = page_texts.len(),
            "Tesseract OCR complete"
        );

        Ok(page_texts.join("\n\n"))
    }
}
