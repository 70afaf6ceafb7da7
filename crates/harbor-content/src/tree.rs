//! Ordered directory listings.
//!
//! [`ContentTreeBuilder`] lists the immediate children of a directory under
//! the content root. Document files contribute `title`/`order`/`tags` from
//! their front matter; directories contribute `order`/`title` from a sidecar
//! metadata file (default `meta.yaml`). Missing or malformed metadata is
//! tolerated: the entry keeps its defaults and a diagnostic is logged.
//!
//! # Sort order
//!
//! Entries with an explicit numeric `order` come first, ascending, ties
//! broken by name. Everything else follows, sorted by name. The rule is
//! uniform across files and directories: an ordered file sorts before an
//! unordered directory.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::walk::{allowed_extension, is_hidden};
use crate::{ContentError, PathResolver, frontmatter};

/// A single entry in a directory listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// File or directory name.
    pub name: String,
    /// Normalized forward-slash path, relative to the content root.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// File size in bytes (0 for directories).
    pub size: u64,
    /// Last modification time.
    pub last_modified: DateTime<Utc>,
    /// Explicit listing position, if declared in metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Display title (metadata title, or derived from the name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Tags from front matter (document files only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Unrecognized metadata keys, passed through raw.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Listing options.
#[derive(Debug, Clone)]
pub struct TreeOptions {
    /// File extensions included in listings (lowercase, without dot).
    pub extensions: Vec<String>,
    /// Name of the per-directory sidecar metadata file.
    pub meta_filename: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned()],
            meta_filename: "meta.yaml".to_owned(),
        }
    }
}

/// Builds ordered directory listings under a content root.
#[derive(Debug, Clone)]
pub struct ContentTreeBuilder {
    resolver: PathResolver,
    options: TreeOptions,
}

impl ContentTreeBuilder {
    /// Create a builder with default options.
    #[must_use]
    pub fn new(resolver: PathResolver) -> Self {
        Self::with_options(resolver, TreeOptions::default())
    }

    /// Create a builder with explicit options.
    #[must_use]
    pub fn with_options(resolver: PathResolver, options: TreeOptions) -> Self {
        Self { resolver, options }
    }

    /// The path resolver this builder lists through.
    #[must_use]
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// List the immediate children of a directory, sorted.
    ///
    /// # Errors
    ///
    /// - [`ContentError::InvalidPath`] on traversal attempts
    /// - [`ContentError::NotFound`] if the directory does not exist
    /// - [`ContentError::NotADirectory`] if the path resolves to a file
    /// - [`ContentError::Io`] on unexpected read failures
    pub fn list(&self, directory_path: &str) -> Result<Vec<ContentItem>, ContentError> {
        let relative = PathResolver::normalize(directory_path)?;
        let dir = self.resolver.resolve(directory_path)?;

        let dir_meta = fs::metadata(&dir).map_err(|e| not_found_or_io(e, &relative))?;
        if !dir_meta.is_dir() {
            return Err(ContentError::NotADirectory(relative));
        }

        let mut items = Vec::new();
        for entry in fs::read_dir(&dir)?.filter_map(Result::ok) {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) || name == self.options.meta_filename {
                continue;
            }

            let is_directory = entry.file_type().is_ok_and(|t| t.is_dir());
            if !is_directory && !allowed_extension(&name, &self.options.extensions) {
                continue;
            }

            let item_path = if relative.is_empty() {
                name.clone()
            } else {
                format!("{relative}/{name}")
            };

            let (size, last_modified) = match entry.metadata() {
                Ok(meta) => (
                    if is_directory { 0 } else { meta.len() },
                    meta.modified()
                        .map(DateTime::<Utc>::from)
                        .unwrap_or(DateTime::UNIX_EPOCH),
                ),
                Err(e) => {
                    tracing::warn!(path = %item_path, error = %e, "Failed to stat entry");
                    (0, DateTime::UNIX_EPOCH)
                }
            };

            let front_matter = if is_directory {
                self.read_sidecar(&entry.path(), &item_path)
            } else {
                read_front_matter(&entry.path(), &item_path)
            };

            let mut item = ContentItem {
                title: Some(title_from_name(&name)),
                name,
                path: item_path,
                is_directory,
                size,
                last_modified,
                order: None,
                tags: None,
                metadata: HashMap::new(),
            };
            if let Some(fm) = front_matter {
                if fm.title.is_some() {
                    item.title = fm.title;
                }
                item.order = fm.order;
                item.tags = fm.tags;
                item.metadata = fm.extra;
            }
            items.push(item);
        }

        items.sort_by(compare_items);
        Ok(items)
    }

    /// Read a directory's sidecar metadata file.
    ///
    /// A missing sidecar is the common case and stays silent; a malformed
    /// one is logged and treated as absent.
    fn read_sidecar(&self, dir: &Path, item_path: &str) -> Option<frontmatter::FrontMatter> {
        let sidecar = dir.join(&self.options.meta_filename);
        let content = fs::read_to_string(&sidecar).ok()?;
        let parsed = frontmatter::parse_block(&content);
        if parsed.is_none() {
            tracing::warn!(path = %item_path, "Malformed sidecar metadata, using defaults");
        }
        parsed
    }
}

/// Read and extract a document's front matter, tolerating failures.
fn read_front_matter(path: &Path, item_path: &str) -> Option<frontmatter::FrontMatter> {
    match fs::read_to_string(path) {
        Ok(content) => frontmatter::extract(&content),
        Err(e) => {
            tracing::warn!(path = %item_path, error = %e, "Failed to read document, using defaults");
            None
        }
    }
}

/// Ordering: explicit `order` ascending first, then unordered by name.
fn compare_items(a: &ContentItem, b: &ContentItem) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

/// Derive a display title from a file or directory name.
///
/// Strips a known document extension and replaces `-`/`_` with spaces:
/// `getting-started.md` becomes `getting started`.
#[must_use]
pub fn title_from_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map_or(name, |s| s.to_str().unwrap_or(name));
    stem.replace(['-', '_'], " ")
}

fn not_found_or_io(e: io::Error, relative: &str) -> ContentError {
    if e.kind() == io::ErrorKind::NotFound {
        ContentError::NotFound(relative.to_owned())
    } else {
        ContentError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn builder(root: &Path) -> ContentTreeBuilder {
        ContentTreeBuilder::new(PathResolver::new(root))
    }

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_list_explicit_order_precedes_unordered() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        write(&docs, "a.md", "---\norder: 2\n---\n# A");
        write(&docs, "b.md", "---\norder: 1\n---\n# B");
        write(&docs, "c.md", "# C");

        let items = builder(temp.path()).list("docs").unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();

        assert_eq!(names, vec!["b.md", "a.md", "c.md"]);
    }

    #[test]
    fn test_list_order_wins_over_type() {
        let temp = tempfile::tempdir().unwrap();
        let sub = temp.path().join("zsub");
        fs::create_dir(&sub).unwrap();
        write(temp.path(), "first.md", "---\norder: 1\n---\n");

        // Unordered directory sorts after the ordered file.
        let items = builder(temp.path()).list("").unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first.md", "zsub"]);
    }

    #[test]
    fn test_list_directory_order_from_sidecar() {
        let temp = tempfile::tempdir().unwrap();
        let sub = temp.path().join("zzz");
        fs::create_dir(&sub).unwrap();
        write(&sub, "meta.yaml", "order: 1\ntitle: First Section");
        write(temp.path(), "apple.md", "# Apple");

        let items = builder(temp.path()).list("").unwrap();

        assert_eq!(items[0].name, "zzz");
        assert_eq!(items[0].order, Some(1));
        assert_eq!(items[0].title, Some("First Section".to_owned()));
        assert_eq!(items[1].name, "apple.md");
    }

    #[test]
    fn test_list_order_ties_broken_by_name() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "b.md", "---\norder: 1\n---\n");
        write(temp.path(), "a.md", "---\norder: 1\n---\n");

        let items = builder(temp.path()).list("").unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md"]);
    }

    #[test]
    fn test_list_excludes_disallowed_extensions_and_hidden() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "doc.md", "# Doc");
        write(temp.path(), "image.png", "");
        write(temp.path(), "notes.txt", "");
        write(temp.path(), ".hidden.md", "# Hidden");
        write(temp.path(), "meta.yaml", "order: 1");

        let items = builder(temp.path()).list("").unwrap();
        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["doc.md"]);
    }

    #[test]
    fn test_list_malformed_front_matter_falls_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "broken-doc.md", "---\ntitle: [oops\n---\n");

        let items = builder(temp.path()).list("").unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order, None);
        assert_eq!(items[0].title, Some("broken doc".to_owned()));
    }

    #[test]
    fn test_list_malformed_sidecar_falls_back_to_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let sub = temp.path().join("section");
        fs::create_dir(&sub).unwrap();
        write(&sub, "meta.yaml", "order: [not an int");

        let items = builder(temp.path()).list("").unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].order, None);
        assert_eq!(items[0].title, Some("section".to_owned()));
    }

    #[test]
    fn test_list_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let err = builder(temp.path()).list("nope").unwrap_err();
        assert!(matches!(err, ContentError::NotFound(p) if p == "nope"));
    }

    #[test]
    fn test_list_file_is_not_a_directory() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "doc.md", "# Doc");

        let err = builder(temp.path()).list("doc.md").unwrap_err();
        assert!(matches!(err, ContentError::NotADirectory(p) if p == "doc.md"));
    }

    #[test]
    fn test_list_traversal_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let err = builder(temp.path()).list("../outside").unwrap_err();
        assert!(matches!(err, ContentError::InvalidPath(_)));
    }

    #[test]
    fn test_list_paths_are_root_relative() {
        let temp = tempfile::tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir(&docs).unwrap();
        write(&docs, "guide.md", "---\ntags: [a, b]\n---\n");

        let items = builder(temp.path()).list("/docs/").unwrap();

        assert_eq!(items[0].path, "docs/guide.md");
        assert_eq!(items[0].tags, Some(vec!["a".to_owned(), "b".to_owned()]));
        assert!(!items[0].is_directory);
    }

    #[test]
    fn test_list_front_matter_extra_keys_exposed_as_metadata() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "doc.md", "---\ntitle: T\nauthor: someone\n---\n");

        let items = builder(temp.path()).list("").unwrap();
        assert_eq!(
            items[0].metadata.get("author"),
            Some(&serde_json::json!("someone"))
        );
    }

    #[test]
    fn test_content_item_json_shape() {
        let item = ContentItem {
            name: "guide.md".to_owned(),
            path: "docs/guide.md".to_owned(),
            is_directory: false,
            size: 42,
            last_modified: DateTime::UNIX_EPOCH,
            order: Some(1),
            title: Some("Guide".to_owned()),
            tags: None,
            metadata: HashMap::new(),
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["name"], "guide.md");
        assert_eq!(json["isDirectory"], false);
        assert_eq!(json["lastModified"], "1970-01-01T00:00:00Z");
        assert_eq!(json["order"], 1);
        assert!(json.get("tags").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_title_from_name() {
        assert_eq!(title_from_name("getting-started.md"), "getting started");
        assert_eq!(title_from_name("api_reference"), "api reference");
        assert_eq!(title_from_name("plain"), "plain");
    }
}
