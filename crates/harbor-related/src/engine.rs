//! Relevance scanning and ranking.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use harbor_content::{ContentError, PathResolver, frontmatter, title_from_name, walk_documents};

use crate::RelatedCache;

/// A candidate document ranked against the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedDocument {
    /// Normalized root-relative path.
    pub path: String,
    /// Display title (front matter title, or derived from the file name).
    pub title: String,
    /// Tags shared with the target, in the target's tag order.
    pub common_tags: Vec<String>,
    /// Number of shared tags.
    pub common_tags_count: usize,
    /// Relevance score; equal to the shared-tag count, always at least 1.
    pub relevance: usize,
}

/// Outcome of a related-documents lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedResult {
    /// Ranked related documents, truncated to the requested limit.
    pub related: Vec<RelatedDocument>,
    /// Whether the ranking was served from cache.
    pub from_cache: bool,
}

/// Ranks documents by tag overlap with a target document.
///
/// Scans run over the live filesystem; completed rankings are written
/// untruncated to the shared [`RelatedCache`] so later requests with a
/// larger limit are served without rescanning.
pub struct RelevanceEngine {
    resolver: PathResolver,
    cache: Arc<RelatedCache>,
    extensions: Vec<String>,
    default_extension: String,
}

impl RelevanceEngine {
    /// Create an engine over `resolver`'s content root, sharing `cache`.
    #[must_use]
    pub fn new(resolver: PathResolver, cache: Arc<RelatedCache>) -> Self {
        Self {
            resolver,
            cache,
            extensions: vec!["md".to_owned()],
            default_extension: "md".to_owned(),
        }
    }

    /// Replace the document extension allow-list. The first entry becomes
    /// the default extension appended to bare paths.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        if let Some(first) = extensions.first() {
            self.default_extension.clone_from(first);
        }
        self.extensions = extensions;
        self
    }

    /// Find documents related to `document_path` by shared tags.
    ///
    /// The ranking is descending by relevance; ties keep the order in which
    /// the walk discovered the files, so output is deterministic for a fixed
    /// tree. A target without tags yields an empty ranking.
    ///
    /// # Errors
    ///
    /// - [`ContentError::MissingPath`] if `document_path` is empty
    /// - [`ContentError::InvalidPath`] on traversal attempts
    /// - [`ContentError::NotFound`] if the target file does not exist
    /// - [`ContentError::Io`] if the target cannot be read
    pub fn find_related(
        &self,
        document_path: &str,
        limit: usize,
        skip_cache: bool,
    ) -> Result<RelatedResult, ContentError> {
        if document_path.trim().is_empty() {
            return Err(ContentError::MissingPath);
        }

        let mut key = PathResolver::normalize(document_path)?;
        if key.is_empty() {
            return Err(ContentError::MissingPath);
        }
        if Path::new(&key).extension().is_none() {
            key = format!("{key}.{}", self.default_extension);
        }

        let target = self.resolver.resolve(&key)?;
        if !target.is_file() {
            return Err(ContentError::NotFound(key));
        }

        if !skip_cache && let Some(mut cached) = self.cache.get(&key) {
            cached.truncate(limit);
            return Ok(RelatedResult {
                related: cached,
                from_cache: true,
            });
        }

        let content = fs::read_to_string(&target)?;
        let target_tags = frontmatter::extract(&content).and_then(|fm| fm.tags);
        let Some(target_tags) = target_tags.filter(|t| !t.is_empty()) else {
            // Relevance is undefined without tags; not an error.
            return Ok(RelatedResult {
                related: Vec::new(),
                from_cache: false,
            });
        };

        let mut ranking = self.scan(&key, &target_tags);

        // Stable: ties keep discovery order.
        ranking.sort_by(|a, b| b.relevance.cmp(&a.relevance));

        self.cache.set(key, ranking.clone());
        ranking.truncate(limit);
        Ok(RelatedResult {
            related: ranking,
            from_cache: false,
        })
    }

    /// Scan every document under the root, scoring tag overlap with the target.
    fn scan(&self, target_key: &str, target_tags: &[String]) -> Vec<RelatedDocument> {
        let target_stem = strip_extension(target_key);
        let mut ranking = Vec::new();

        for doc in walk_documents(self.resolver.root(), &self.extensions) {
            if strip_extension(&doc.rel_path) == target_stem {
                continue;
            }

            let content = match fs::read_to_string(&doc.path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %doc.rel_path, error = %e, "Skipping unreadable candidate");
                    continue;
                }
            };

            let Some(fm) = frontmatter::extract(&content) else {
                continue;
            };
            let Some(tags) = fm.tags.filter(|t| !t.is_empty()) else {
                continue;
            };

            let candidate_tags: HashSet<&str> = tags.iter().map(String::as_str).collect();
            let common_tags: Vec<String> = target_tags
                .iter()
                .filter(|t| candidate_tags.contains(t.as_str()))
                .cloned()
                .collect();
            if common_tags.is_empty() {
                continue;
            }

            let name = doc.rel_path.rsplit('/').next().unwrap_or(&doc.rel_path);
            ranking.push(RelatedDocument {
                title: fm.title.unwrap_or_else(|| title_from_name(name)),
                path: doc.rel_path,
                common_tags_count: common_tags.len(),
                relevance: common_tags.len(),
                common_tags,
            });
        }

        ranking
    }
}

/// Strip the extension from the final segment of a forward-slash path.
fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(i) if i > 0 => &path[..name_start + i],
        _ => path,
    }
}
