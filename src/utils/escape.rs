//! Escape Utilities

/// Converts CR-LF pairs and lone CRs to LF.
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Makes newlines and tabs visible so a string fits on one table line.
///
/// Backslashes are doubled first so the result stays unambiguous.
pub fn escape_visible(s: &str) -> String {
    let s = normalize_newlines(s);
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
