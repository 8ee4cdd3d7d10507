use parley::application::ports::RecognitionError;
use parley::domain::{ContentType, ImageFormat};
use parley::infrastructure::ocr::page_images;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

#[tokio::test]
async fn given_declared_image_when_preparing_pages_then_passes_bytes_through() {
    let pages = page_images(b"raw jpeg bytes", ContentType::Image(ImageFormat::Jpeg))
        .await
        .unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].bytes, b"raw jpeg bytes");
    assert_eq!(pages[0].format, ImageFormat::Jpeg);
}

#[tokio::test]
async fn given_unknown_bytes_with_image_magic_when_preparing_pages_then_detects_format() {
    let pages = page_images(PNG_MAGIC, ContentType::Unknown).await.unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].format, ImageFormat::Png);
}

#[tokio::test]
async fn given_unknown_bytes_without_image_magic_when_preparing_pages_then_unreadable() {
    let result = page_images(b"\x00\x01\x02\x03 plain garbage", ContentType::Unknown).await;

    assert!(matches!(result, Err(RecognitionError::UnreadableInput(_))));
}

#[tokio::test]
async fn given_text_content_when_preparing_pages_then_unreadable() {
    let result = page_images(b"just some words", ContentType::Text).await;

    assert!(matches!(result, Err(RecognitionError::UnreadableInput(_))));
}
