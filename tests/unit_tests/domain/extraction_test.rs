use parley::domain::{ExtractionResult, SourceMethod};

#[test]
fn given_blank_text_when_creating_result_then_returns_none() {
    assert!(ExtractionResult::new("  \n\t".to_string(), SourceMethod::StructuredParse).is_none());
}

#[test]
fn given_long_text_when_truncating_then_keeps_leading_chars() {
    let result = ExtractionResult::new("abcdefghij".to_string(), SourceMethod::StructuredParse)
        .unwrap()
        .truncated(4);

    assert_eq!(result.text(), "abcd");
    assert_eq!(result.source_method(), SourceMethod::StructuredParse);
}

#[test]
fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
    let result = ExtractionResult::new("ñandú über".to_string(), SourceMethod::OpticalRecognition)
        .unwrap()
        .truncated(5);

    assert_eq!(result.text(), "ñandú");
    assert_eq!(result.char_count(), 5);
}

#[test]
fn given_short_text_when_truncating_then_unchanged() {
    let result = ExtractionResult::new("short".to_string(), SourceMethod::StructuredParse)
        .unwrap()
        .truncated(100);

    assert_eq!(result.into_text(), "short");
}

#[test]
fn given_source_method_when_displayed_then_uses_wire_name() {
    assert_eq!(SourceMethod::StructuredParse.to_string(), "STRUCTURED_PARSE");
    assert_eq!(
        SourceMethod::OpticalRecognition.to_string(),
        "OPTICAL_RECOGNITION"
    );
}
