//! Line based text helpers.

/// Splits text into lines.
///
/// CR-LF and lone CR count as line breaks. A trailing line break does not
/// start an extra empty line.
pub fn split_lines(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }
    let s = super::escape::normalize_newlines(s);
    let body = s.strip_suffix('\n').unwrap_or(&s);
    body.split('\n').map(|l| l.to_string()).collect()
}

/// Pairs lines by position, stopping at the shorter side.
pub fn zip_lines(original: Vec<String>, translated: Vec<String>) -> Vec<(String, String)> {
    original.into_iter().zip(translated).collect()
}

#[test]
fn test_split_lines() {
    assert_eq!(split_lines("A\nB\nC\n"), vec!["A", "B", "C"]);
    assert_eq!(split_lines("A\r\nB\rC"), vec!["A", "B", "C"]);
    assert_eq!(split_lines("A\n\nB\n"), vec!["A", "", "B"]);
    assert_eq!(split_lines("\n"), vec![""]);
    assert!(split_lines("").is_empty());
}

#[test]
fn test_zip_lines() {
    let original = split_lines("A\nB\nC\n");
    let translated = split_lines("X\nY\n");
    assert_eq!(
        zip_lines(original, translated),
        vec![
            ("A".to_string(), "X".to_string()),
            ("B".to_string(), "Y".to_string())
        ]
    );
}
