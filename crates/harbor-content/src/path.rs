//! Safe path resolution.
//!
//! Client-supplied paths arrive as URL fragments with arbitrary separators
//! and redundant segments. [`PathResolver`] normalizes them and confines the
//! result to the configured content root, rejecting traversal attempts
//! before any filesystem access happens.

use std::path::{Path, PathBuf};

use crate::ContentError;

/// Resolves client-supplied paths against a content root.
///
/// Pure over (root, input): no filesystem access, no side effects.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver confined to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The content root all resolved paths are confined to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalize a raw path into forward-slash, root-relative form.
    ///
    /// Both `/` and `\` act as separators. Empty and `.` segments are
    /// dropped, which also strips leading slashes. The root itself
    /// normalizes to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidPath`] if any segment is `..`.
    pub fn normalize(raw: &str) -> Result<String, ContentError> {
        let mut segments = Vec::new();
        for segment in raw.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => return Err(ContentError::InvalidPath(raw.to_owned())),
                other => segments.push(other),
            }
        }
        Ok(segments.join("/"))
    }

    /// Resolve a raw path to an absolute filesystem path under the root.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::InvalidPath`] on traversal attempts or when
    /// the resolved path would fall outside the content root.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, ContentError> {
        let relative = Self::normalize(raw)?;
        let resolved = if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&relative)
        };

        // Normalization removed every `..`, so this only fails if the root
        // itself was tampered with between construction and resolution.
        if !resolved.starts_with(&self.root) {
            return Err(ContentError::InvalidPath(raw.to_owned()));
        }

        Ok(resolved)
    }
}
