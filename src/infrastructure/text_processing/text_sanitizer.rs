use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

const SOFT_HYPHEN: char = '\u{00AD}';

/// Normalises text from either the PDF text layer or OCR output: NFKC,
/// control characters (tesseract page breaks included) removed, words split
/// across lines re-joined, runs of blank lines collapsed to one paragraph break.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let normalized: String = raw
        .nfkc()
        .filter(|&ch| ch != SOFT_HYPHEN)
        .map(|ch| if ch == '\u{000C}' { '\n' } else { ch })
        .filter(|&ch| !ch.is_control() || ch == '\n' || ch == '\t' || ch == '\r')
        .collect();
    let de_hyphenated = HYPHEN_NEWLINE.replace_all(&normalized, "$prefix$suffix");

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in de_hyphenated.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        collapse_internal_whitespace(trimmed, &mut current);
    }

    if !current.is_empty() {
        paragraphs.push(current);
    }

    paragraphs.join("\n\n")
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
