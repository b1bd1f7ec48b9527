//! Artwork metadata fallbacks and parameter-blob normalization.

use serde_json::Value;

/// Placeholder title when neither a title nor a prompt is supplied.
pub const TITLE_FALLBACK: &str = "Untitled";

/// Placeholder description when neither a description nor a prompt is supplied.
pub const DESCRIPTION_FALLBACK: &str = "No description";

/// Maximum number of characters of the prompt used as a fallback title.
pub const TITLE_FROM_PROMPT_MAX_CHARS: usize = 100;

/// Resolve the stored title: explicit title, else the prompt truncated to
/// [`TITLE_FROM_PROMPT_MAX_CHARS`] characters, else [`TITLE_FALLBACK`].
///
/// Truncation counts characters, not bytes, so multi-byte prompts never
/// split a char boundary.
pub fn resolve_title(title: Option<&str>, prompt: Option<&str>) -> String {
    if let Some(t) = title {
        if !t.trim().is_empty() {
            return t.to_string();
        }
    }
    match prompt {
        Some(p) if !p.trim().is_empty() => p.chars().take(TITLE_FROM_PROMPT_MAX_CHARS).collect(),
        _ => TITLE_FALLBACK.to_string(),
    }
}

/// Resolve the stored description: explicit description, else the full
/// prompt, else [`DESCRIPTION_FALLBACK`].
pub fn resolve_description(description: Option<&str>, prompt: Option<&str>) -> String {
    if let Some(d) = description {
        if !d.trim().is_empty() {
            return d.to_string();
        }
    }
    match prompt {
        Some(p) if !p.trim().is_empty() => p.to_string(),
        _ => DESCRIPTION_FALLBACK.to_string(),
    }
}

/// Normalize a generation parameter blob to a JSON-serialized string.
///
/// Clients submit `parameters` either as a JSON object or as an
/// already-serialized string; storage always holds a string. A string value
/// is stored verbatim (the round-trip guarantee holds for valid JSON input),
/// any other value is serialized. `None` normalizes to `"{}"`.
pub fn normalize_parameters(parameters: Option<&Value>) -> String {
    match parameters {
        None | Some(Value::Null) => "{}".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
