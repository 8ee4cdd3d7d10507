use super::MessageRole;

/// A message as listed back from a remote thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadMessage {
    pub id: String,
    pub role: MessageRole,
    pub created_at: i64,
    pub text: Option<String>,
}

/// Picks the most recently appended assistant message. `messages` must be in
/// chronological order; equal timestamps resolve to the later entry.
pub fn latest_assistant_message(messages: &[ThreadMessage]) -> Option<&ThreadMessage> {
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| m.role == MessageRole::Assistant)
        .max_by_key(|(position, m)| (m.created_at, *position))
        .map(|(_, m)| m)
}
