/// Shared utility functions

/// Marker appended to a preview that was cut short.
pub const ELLIPSIS: &str = "...";

/// Safely truncate a string to at most `max_chars` characters
pub fn safe_truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// First `max_chars` characters of `s`, with `...` appended when anything was cut
pub fn preview(s: &str, max_chars: usize) -> String {
    let head = safe_truncate(s, max_chars);
    if head.len() < s.len() {
        format!("{}{}", head, ELLIPSIS)
    } else {
        s.to_string()
    }
}
