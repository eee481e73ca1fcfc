//! Text encodings at the store boundary.
//!
//! Multi-select fields live as JSON arrays inside nullable TEXT columns; the
//! in-memory model only ever sees real `Vec`s.

/// Encodes a multi-select field for its TEXT column. Empty selections encode
/// as `[]`, not NULL.
pub fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

/// Decodes a stored multi-select column.
///
/// NULL and anything that does not parse as a JSON string array decode to
/// the empty list; a bad stored value never fails a listing.
pub fn decode_list(raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(err) => {
            tracing::debug!(%err, "stored multi-select value unreadable, dropping");
            Vec::new()
        }
    }
}

/// Trims an optional free-text field; blank collapses to absent (NULL),
/// never the empty string.
pub fn normalize_text(value: &Option<String>) -> Option<String> {
    let trimmed = value.as_deref()?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
