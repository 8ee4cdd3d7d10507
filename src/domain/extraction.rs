use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMethod {
    StructuredParse,
    OpticalRecognition,
}

impl SourceMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMethod::StructuredParse => "STRUCTURED_PARSE",
            SourceMethod::OpticalRecognition => "OPTICAL_RECOGNITION",
        }
    }
}

impl fmt::Display for SourceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text pulled out of an upload. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    text: String,
    source_method: SourceMethod,
}

impl ExtractionResult {
    /// Returns `None` when `text` has no visible characters.
    pub fn new(text: String, source_method: SourceMethod) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            source_method,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source_method(&self) -> SourceMethod {
        self.source_method
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Keeps at most `max_chars` characters from the start of the text.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if let Some((byte_index, _)) = self.text.char_indices().nth(max_chars) {
            self.text.truncate(byte_index);
        }
        self
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
