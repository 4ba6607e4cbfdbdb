//! Label helpers shared by the provider records.

/// Normalizes a free-form label so `"New Convert"`, `"new_convert"` and
/// `" new-convert "` compare equal.
pub fn normalize_label(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut last_dash = false;
    for ch in raw.trim().chars() {
        if ch.is_alphanumeric() {
            normalized.extend(ch.to_lowercase());
            last_dash = false;
        } else if matches!(ch, ' ' | '_' | '-' | '.') && !normalized.is_empty() && !last_dash {
            normalized.push('-');
            last_dash = true;
        }
    }
    normalized.trim_end_matches('-').to_string()
}

/// Returns the label when it carries any non-whitespace content.
pub fn present(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|value| !value.is_empty())
}
