//! Manifest line scanning
//!
//! The manifest is one JSON object per line, but only three string fields
//! matter and producers are not always well behaved, so extraction is a
//! tolerant key-then-quoted-value scan rather than a JSON parse. A backslash
//! inside a quoted value consumes the next byte literally. Lines without a
//! `doc_id` are skipped by the caller; `title` defaults to the doc_id and
//! `url` to empty.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub doc_id: String,
    pub title: String,
    pub url: String,
}

/// Extract one manifest entry, or `None` when the line has no `doc_id`.
pub fn parse_line(line: &str) -> Option<ManifestEntry> {
    let doc_id = extract_string_field(line, "doc_id")?;
    let title = extract_string_field(line, "title")
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| doc_id.clone());
    let url = extract_string_field(line, "url").unwrap_or_default();
    Some(ManifestEntry { doc_id, title, url })
}

fn extract_string_field(line: &str, key: &str) -> Option<String> {
    let pattern = format!("\"{}\":", key);
    let bytes = line.as_bytes();
    let mut i = line.find(&pattern)? + pattern.len();

    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'"' {
        return None;
    }
    i += 1;

    let mut value = Vec::new();
    while i < bytes.len() && bytes[i] != b'"' {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            i += 1;
        }
        value.push(bytes[i]);
        i += 1;
    }
    Some(String::from_utf8_lossy(&value).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line() {
        let entry = parse_line(
            r#"{"doc_id": "0001", "title": "A Title", "url": "http://example.com/a"}"#,
        )
        .unwrap();
        assert_eq!(entry.doc_id, "0001");
        assert_eq!(entry.title, "A Title");
        assert_eq!(entry.url, "http://example.com/a");
    }

    #[test]
    fn test_missing_doc_id_skips_line() {
        assert_eq!(parse_line(r#"{"title": "no id here"}"#), None);
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("not json at all"), None);
    }

    #[test]
    fn test_defaults() {
        let entry = parse_line(r#"{"doc_id": "42"}"#).unwrap();
        assert_eq!(entry.title, "42");
        assert_eq!(entry.url, "");

        let entry = parse_line(r#"{"doc_id": "42", "title": ""}"#).unwrap();
        assert_eq!(entry.title, "42");
    }

    #[test]
    fn test_backslash_consumes_next_byte() {
        let entry = parse_line(r#"{"doc_id": "x", "title": "say \"hi\" now"}"#).unwrap();
        assert_eq!(entry.title, "say \"hi\" now");

        // escapes are literal bytes, not JSON escapes
        let entry = parse_line(r#"{"doc_id": "x", "title": "a\nb"}"#).unwrap();
        assert_eq!(entry.title, "anb");
    }

    #[test]
    fn test_tolerates_malformed_tails() {
        // unterminated value still yields what was scanned
        let entry = parse_line(r#"{"doc_id": "x", "title": "runs off"#).unwrap();
        assert_eq!(entry.title, "runs off");

        // non-string value for a key is treated as absent
        let entry = parse_line(r#"{"doc_id": "x", "title": 7}"#).unwrap();
        assert_eq!(entry.title, "x");
    }
}
