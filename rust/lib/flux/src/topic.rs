//! MQTT-style pattern matching over `/`-separated paths.
//!
//! - `+` matches exactly one segment.
//! - `#` matches zero or more trailing segments and must be last.

/// Does `pattern` match the concrete `path`?
pub fn matches(pattern: &str, path: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut segs = path.split('/');
    loop {
        match (pat.next(), segs.next()) {
            (Some("#"), _) => return pat.next().is_none(),
            (Some("+"), Some(_)) => {}
            (Some(p), Some(s)) if p == s => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// A pattern is well formed when `#` only appears as the final segment.
pub fn is_valid_pattern(pattern: &str) -> bool {
    let segments: Vec<&str> = pattern.split('/').collect();
    !pattern.is_empty()
        && segments
            .iter()
            .enumerate()
            .all(|(i, s)| *s != "#" || i + 1 == segments.len())
}
