use parley::application::ports::{FileLoader, FileLoaderError};
use parley::domain::UploadedDocument;
use parley::infrastructure::text_processing::PlainTextAdapter;

#[tokio::test]
async fn given_utf8_text_when_extracting_then_returns_sanitized_text() {
    let document = UploadedDocument::new(
        "Line   one\n\n\n\nLine two".as_bytes().to_vec(),
        "text/plain".to_string(),
        "notes.txt".to_string(),
    );

    let text = PlainTextAdapter.extract_text(&document).await.unwrap();

    assert_eq!(text, "Line one\n\nLine two");
}

#[tokio::test]
async fn given_invalid_utf8_when_extracting_then_returns_extraction_failed() {
    let document = UploadedDocument::new(
        vec![0xff, 0xfe, 0xfd],
        "text/plain".to_string(),
        "broken.txt".to_string(),
    );

    let result = PlainTextAdapter.extract_text(&document).await;

    assert!(matches!(result, Err(FileLoaderError::ExtractionFailed(_))));
}
