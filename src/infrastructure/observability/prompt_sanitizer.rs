const MAX_VISIBLE_CHARS: usize = 100;

const REDACTIONS: &[(&str, &str)] = &[
    ("Bearer ", "Bearer [REDACTED]"),
    ("api_key=", "api_key=[REDACTED]"),
    ("password=", "password=[REDACTED]"),
    ("secret=", "secret=[REDACTED]"),
    ("token=", "token=[REDACTED]"),
];

/// Shortens prompt text and masks credential-looking values before it is logged.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = match trimmed.char_indices().nth(MAX_VISIBLE_CHARS) {
        Some((cut, _)) => format!("{}... ({} chars total)", &trimmed[..cut], total_chars),
        None => trimmed.to_string(),
    };

    REDACTIONS
        .iter()
        .fold(visible, |text, (pattern, replacement)| redact(&text, pattern, replacement))
}

/// Replaces every occurrence of `pattern` and the value following it.
fn redact(text: &str, pattern: &str, replacement: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(pattern) {
        result.push_str(&rest[..idx]);
        result.push_str(replacement);

        let value = &rest[idx + pattern.len()..];
        let end = value
            .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
            .unwrap_or(value.len());
        rest = &value[end..];
    }

    result.push_str(rest);
    result
}
