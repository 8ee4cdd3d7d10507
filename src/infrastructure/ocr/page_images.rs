use std::time::Duration;

use crate::application::ports::RecognitionError;
use crate::domain::{ContentType, ImageFormat};
use crate::infrastructure::text_processing::rasterize_pages;

pub const RASTERIZE_TIMEOUT: Duration = Duration::from_secs(120);

pub struct PageImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Produces the images an OCR engine should read: rendered pages for a PDF,
/// the upload itself for an image. Anything else must decode as an image.
pub async fn page_images(
    data: &[u8],
    content_type: ContentType,
) -> Result<Vec<PageImage>, RecognitionError> {
    match content_type {
        ContentType::Pdf => {
            let data_owned = data.to_vec();
            let png_buffers = tokio::time::timeout(
                RASTERIZE_TIMEOUT,
                tokio::task::spawn_blocking(move || {
                    std::panic::catch_unwind(|| rasterize_pages(&data_owned)).unwrap_or_else(|_| {
                        Err(RecognitionError::EngineFailed(
                            "panic during PDF rasterization".to_string(),
                        ))
                    })
                }),
            )
            .await
            .map_err(|_| RecognitionError::EngineFailed("PDF rasterization timed out".to_string()))?
            .map_err(|e| RecognitionError::EngineFailed(format!("task join error: {e}")))??;

            tracing::debug!(pages = png_buffers.len(), "PDF rasterized for OCR");

            Ok(png_buffers
                .into_iter()
                .map(|bytes| PageImage {
                    bytes,
                    format: ImageFormat::Png,
                })
                .collect())
        }
        ContentType::Image(format) => Ok(vec![PageImage {
            bytes: data.to_vec(),
            format,
        }]),
        ContentType::Text | ContentType::Unknown => {
            let format = guess_image_format(data)?;
            Ok(vec![PageImage {
                bytes: data.to_vec(),
                format,
            }])
        }
    }
}

fn guess_image_format(data: &[u8]) -> Result<ImageFormat, RecognitionError> {
    let guessed = image::guess_format(data)
        .map_err(|e| RecognitionError::UnreadableInput(e.to_string()))?;

    match guessed {
        image::ImageFormat::Png => Ok(ImageFormat::Png),
        image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
        image::ImageFormat::Gif => Ok(ImageFormat::Gif),
        image::ImageFormat::Tiff => Ok(ImageFormat::Tiff),
        image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
        image::ImageFormat::WebP => Ok(ImageFormat::Webp),
        other => Err(RecognitionError::UnreadableInput(format!(
            "image format {other:?} is not supported for OCR"
        ))),
    }
}
