//! Front matter extraction.
//!
//! Documents may start with a metadata block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! order: 2
//! tags: [setup, install]
//! ---
//! # Getting Started
//! ```
//!
//! Recognized keys are `title`, `order` and `tags`; everything else is kept
//! in the raw [`FrontMatter::extra`] mapping. `tags` accepts either a YAML
//! sequence or a comma-separated string, normalized to a sequence.
//!
//! Uses `serde_yaml` for correct handling of all YAML value styles (quoted
//! strings, flow sequences, block scalars). Malformed or absent front matter
//! yields `None` — callers fall back to defaults, never to an error.

use std::collections::HashMap;

use serde::Deserialize;

/// Metadata extracted from a document's leading `---` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    /// Document title.
    pub title: Option<String>,
    /// Explicit position within the parent directory listing.
    pub order: Option<i64>,
    /// Tags used for related-document ranking.
    pub tags: Option<Vec<String>>,
    /// Unrecognized keys, preserved as raw values.
    pub extra: HashMap<String, serde_json::Value>,
}

/// Raw deserialization target; `tags` still in either accepted shape.
#[derive(Deserialize)]
struct RawFrontMatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    order: Option<i64>,
    #[serde(default)]
    tags: Option<TagList>,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

/// Tags as written: a YAML sequence or a comma-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagList {
    Listed(Vec<String>),
    Joined(String),
}

impl TagList {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Listed(tags) => tags
                .into_iter()
                .map(|t| t.trim().to_owned())
                .filter(|t| !t.is_empty())
                .collect(),
            Self::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Extract front matter from document content.
///
/// Returns `None` when the document has no leading `---` block, the block is
/// unterminated, or the YAML inside it is malformed.
#[must_use]
pub fn extract(content: &str) -> Option<FrontMatter> {
    let block = front_matter_block(content)?;
    parse_block(block)
}

/// Parse a bare YAML metadata block (without `---` delimiters).
///
/// Also used for directory sidecar files, which share the same recognized
/// keys but are stored as standalone YAML.
#[must_use]
pub fn parse_block(yaml: &str) -> Option<FrontMatter> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Some(FrontMatter::default());
    }

    let raw: RawFrontMatter = serde_yaml::from_str(trimmed).ok()?;
    Some(FrontMatter {
        title: raw.title,
        order: raw.order,
        tags: raw.tags.map(TagList::into_vec),
        extra: raw.extra,
    })
}

/// Locate the YAML block between the leading `---` delimiters.
fn front_matter_block(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    // Closing delimiter: a line containing exactly `---`.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_all_keys() {
        let doc = "---\ntitle: Guide\norder: 3\ntags:\n  - setup\n  - install\n---\n# Guide\n";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.title, Some("Guide".to_owned()));
        assert_eq!(fm.order, Some(3));
        assert_eq!(fm.tags, Some(vec!["setup".to_owned(), "install".to_owned()]));
    }

    #[test]
    fn test_extract_flow_sequence_tags() {
        let doc = "---\ntags: [a, b, c]\n---\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(
            fm.tags,
            Some(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn test_extract_comma_separated_tags() {
        let doc = "---\ntags: setup, install , deploy\n---\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(
            fm.tags,
            Some(vec![
                "setup".to_owned(),
                "install".to_owned(),
                "deploy".to_owned()
            ])
        );
    }

    #[test]
    fn test_extract_single_tag_string() {
        let doc = "---\ntags: setup\n---\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.tags, Some(vec!["setup".to_owned()]));
    }

    #[test]
    fn test_extract_empty_tags_sequence() {
        let doc = "---\ntags: []\n---\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.tags, Some(vec![]));
    }

    #[test]
    fn test_extract_no_front_matter() {
        assert!(extract("# Just a heading\n").is_none());
        assert!(extract("").is_none());
    }

    #[test]
    fn test_extract_unterminated_block() {
        assert!(extract("---\ntitle: Broken\n").is_none());
    }

    #[test]
    fn test_extract_malformed_yaml() {
        assert!(extract("---\ntitle: [broken\n---\nbody").is_none());
    }

    #[test]
    fn test_extract_crlf_line_endings() {
        let doc = "---\r\ntitle: Windows\r\n---\r\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.title, Some("Windows".to_owned()));
    }

    #[test]
    fn test_extract_preserves_unrecognized_keys() {
        let doc = "---\ntitle: Guide\nauthor: someone\ndraft: true\n---\nbody";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.extra.get("author"), Some(&serde_json::json!("someone")));
        assert_eq!(fm.extra.get("draft"), Some(&serde_json::json!(true)));
        assert!(!fm.extra.contains_key("title"));
    }

    #[test]
    fn test_parse_block_empty_is_default() {
        let fm = parse_block("").unwrap();
        assert_eq!(fm, FrontMatter::default());
    }

    #[test]
    fn test_parse_block_key_value_lines() {
        // Sidecar files are plain `key: value` lines.
        let fm = parse_block("order: 2\ntitle: Section").unwrap();
        assert_eq!(fm.order, Some(2));
        assert_eq!(fm.title, Some("Section".to_owned()));
    }

    #[test]
    fn test_extract_body_dashes_not_delimiter() {
        // A `---` inside the body after a properly closed block is ignored.
        let doc = "---\ntitle: A\n---\ntext\n---\nmore";
        let fm = extract(doc).unwrap();
        assert_eq!(fm.title, Some("A".to_owned()));
    }
}
