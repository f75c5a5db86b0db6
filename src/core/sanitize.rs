// src/core/sanitize.rs

/// Trim ordinary whitespace plus the non-breaking spaces sheets like to keep.
pub fn clean(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{a0}')
}

/// Leading unsigned integer of a cell: `"12"`, `" 12 rooms"`, `"12.5"` → 12.
/// Anything without leading digits (including negatives) is `None`.
pub fn leading_u32(s: &str) -> Option<u32> {
    let s = clean(s);
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}
