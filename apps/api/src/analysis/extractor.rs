//! Response Extractor — isolates the JSON payload from a raw completion.
//!
//! Purely textual: removes a leading ```` ```json ```` / ```` ``` ```` fence, a
//! trailing ```` ``` ```` fence and surrounding whitespace. No JSON parsing.

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Strips code fences until none remain at either end. Idempotent.
pub fn extract(raw: &str) -> &str {
    let mut current = raw.trim();
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> &str {
    let mut text = text;

    if let Some(rest) = text.strip_prefix(FENCE) {
        text = strip_json_tag(rest);
    }
    if let Some(rest) = text.strip_suffix(FENCE) {
        text = rest;
    }

    text.trim()
}

/// Drops a `json` language tag (any case) directly after an opening fence.
/// The tag must end at whitespace, a fence or the end of input; `jsonc` is not `json`.
fn strip_json_tag(text: &str) -> &str {
    match text.get(..JSON_TAG.len()) {
        Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => {
            let rest = &text[JSON_TAG.len()..];
            match rest.chars().next() {
                None => rest,
                Some(c) if c.is_whitespace() || rest.starts_with(FENCE) => rest,
                Some(_) => text,
            }
        }
        _ => text,
    }
}
