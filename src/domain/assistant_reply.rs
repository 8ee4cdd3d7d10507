#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
}

impl AssistantReply {
    pub fn new(text: String) -> Self {
        Self { text }
    }
}
