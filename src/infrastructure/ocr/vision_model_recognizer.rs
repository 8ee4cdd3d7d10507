use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{OpticalRecognizer, RecognitionError};
use crate::domain::ContentType;
use crate::infrastructure::text_processing::sanitize_extracted_text;

use super::page_images::{PageImage, page_images};

pub const OCR_PROMPT: &str = "Transcribe all readable text in this image exactly as written. \
Keep the reading order and paragraph breaks. Do not describe the image, do not summarise, \
do not add commentary. If there is no readable text, reply with an empty message.";

/// OCR through an OpenAI-compatible vision chat completion, one call per page.
pub struct VisionModelRecognizer {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl VisionModelRecognizer {
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self, RecognitionError> {
        let client = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RecognitionError::EngineFailed(format!("http client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn transcribe_page(
        &self,
        page: &PageImage,
        page_index: usize,
    ) -> Result<String, RecognitionError> {
        let b64 = general_purpose::STANDARD.encode(&page.bytes);
        let data_uri = format!("data:{};base64,{b64}", page.format.as_mime());

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        { "type": "image_url", "image_url": { "url": data_uri } },
                        { "type": "text", "text": OCR_PROMPT }
                    ]
                }
            ],
            "max_tokens": 2048,
            "temperature": 0.0,
            "stream": false
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                RecognitionError::ApiRequestFailed(format!("vision request page {page_index}: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RecognitionError::ApiRequestFailed(format!(
                "vision model returned {status} page {page_index}: {text}"
            )));
        }

        let completion: ChatCompletion = response.json().await.map_err(|e| {
            RecognitionError::ApiRequestFailed(format!(
                "vision response parse error page {page_index}: {e}"
            ))
        })?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl OpticalRecognizer for VisionModelRecognizer {
    #[tracing::instrument(
        skip(self, data),
        fields(content_type = content_type.as_mime(), engine = "vision", model = %self.model)
    )]
    async fn recognize(
        &self,
        data: &[u8],
        content_type: ContentType,
    ) -> Result<String, RecognitionError> {
        let pages = page_images(data, content_type).await?;
        let mut page_texts: Vec<String> = Vec::with_capacity(pages.len());

        for (index, page) in pages.iter().enumerate() {
            let page_text = self.transcribe_page(page, index).await?;
            let page_text = sanitize_extracted_text(&page_text);
            if !page_text.is_empty() {
                page_texts.push(page_text);
            }
        }

        tracing::info!(
            pages = pages.len(),
            pages_with_text = page_texts.len(),
            "Vision model OCR complete"
        );

        Ok(page_texts.join("\n\n"))
    }
}
