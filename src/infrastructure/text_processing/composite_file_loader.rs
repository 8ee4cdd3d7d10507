use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, UploadedDocument};

use super::{PdfAdapter, PlainTextAdapter};

/// Routes a document to the structured parser registered for its content type.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    pub fn with_default_adapters() -> Self {
        let pdf_adapter: Arc<dyn FileLoader> = Arc::new(PdfAdapter::new());
        let text_adapter: Arc<dyn FileLoader> = Arc::new(PlainTextAdapter);
        Self::new(vec![
            (ContentType::Pdf, pdf_adapter),
            (ContentType::Text, text_adapter),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract_text(&self, document: &UploadedDocument) -> Result<String, FileLoaderError> {
        let content_type = document.content_type();
        let adapter = self.adapters.get(&content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(content_type.as_mime().to_string())
        })?;

        adapter.extract_text(document).await
    }
}
