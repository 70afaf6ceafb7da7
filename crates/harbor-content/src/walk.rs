//! Deterministic document enumeration.
//!
//! [`walk_documents`] yields every allow-listed document under a root in
//! depth-first preorder: each directory's entries are visited in name order,
//! and a subdirectory's contents follow immediately after the subdirectory.
//! The traversal uses an explicit work stack, so tree depth never grows the
//! call stack.
//!
//! Unreadable directories are logged and skipped; they never abort a walk.

use std::fs;
use std::path::{Path, PathBuf};

/// A document discovered during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedDocument {
    /// Absolute filesystem path.
    pub path: PathBuf,
    /// Forward-slash path relative to the walk root.
    pub rel_path: String,
}

/// Enumerate all documents under `root` in deterministic preorder.
///
/// `extensions` is the lowercase allow-list (without dots). A missing root
/// yields an empty list.
#[must_use]
pub fn walk_documents(root: &Path, extensions: &[String]) -> Vec<WalkedDocument> {
    let mut documents = Vec::new();
    // Entries are pushed in reverse name order so popping preserves it.
    let mut stack = read_entries(root, "");
    stack.reverse();

    while let Some(entry) = stack.pop() {
        if entry.is_dir {
            let mut children = read_entries(&entry.path, &entry.rel_path);
            children.reverse();
            stack.append(&mut children);
        } else if allowed_extension(&entry.name, extensions) {
            documents.push(WalkedDocument {
                path: entry.path,
                rel_path: entry.rel_path,
            });
        }
    }

    documents
}

struct WalkEntry {
    path: PathBuf,
    rel_path: String,
    name: String,
    is_dir: bool,
}

/// Read a directory's visible entries, sorted by name.
fn read_entries(dir: &Path, prefix: &str) -> Vec<WalkEntry> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory, skipping");
            return Vec::new();
        }
    };

    let mut result: Vec<WalkEntry> = entries
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_hidden(&name) {
                return None;
            }
            let rel_path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}/{name}")
            };
            Some(WalkEntry {
                path: entry.path(),
                rel_path,
                is_dir: entry.file_type().is_ok_and(|t| t.is_dir()),
                name,
            })
        })
        .collect();
    result.sort_by(|a, b| a.name.cmp(&b.name));
    result
}

/// Whether a name starts with a dot (hidden/system entry).
pub(crate) fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Whether a file name carries one of the allow-listed extensions.
pub(crate) fn allowed_extension(name: &str, extensions: &[String]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn md() -> Vec<String> {
        vec!["md".to_owned()]
    }

    fn rel_paths(root: &Path) -> Vec<String> {
        walk_documents(root, &md())
            .into_iter()
            .map(|d| d.rel_path)
            .collect()
    }

    #[test]
    fn test_walk_preorder_name_sorted() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("b.md"), "").unwrap();
        fs::write(temp.path().join("a.md"), "").unwrap();
        let sub = temp.path().join("aa");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("nested.md"), "").unwrap();

        // Directory `aa` sorts before `b.md`; its contents come right after.
        assert_eq!(rel_paths(temp.path()), vec!["a.md", "aa/nested.md", "b.md"]);
    }

    #[test]
    fn test_walk_deep_nesting() {
        let temp = tempfile::tempdir().unwrap();
        let mut dir = temp.path().to_path_buf();
        for level in 0..50 {
            dir = dir.join(format!("level{level:02}"));
            fs::create_dir(&dir).unwrap();
        }
        fs::write(dir.join("deep.md"), "").unwrap();

        let docs = walk_documents(temp.path(), &md());
        assert_eq!(docs.len(), 1);
        assert!(docs[0].rel_path.ends_with("level49/deep.md"));
    }

    #[test]
    fn test_walk_skips_hidden_and_disallowed() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("doc.md"), "").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();
        fs::write(temp.path().join(".draft.md"), "").unwrap();
        let hidden_dir = temp.path().join(".git");
        fs::create_dir(&hidden_dir).unwrap();
        fs::write(hidden_dir.join("inside.md"), "").unwrap();

        assert_eq!(rel_paths(temp.path()), vec!["doc.md"]);
    }

    #[test]
    fn test_walk_missing_root_is_empty() {
        assert!(walk_documents(Path::new("/nonexistent/root"), &md()).is_empty());
    }

    #[test]
    fn test_walk_is_deterministic() {
        let temp = tempfile::tempdir().unwrap();
        for name in ["z.md", "m.md", "a.md"] {
            fs::write(temp.path().join(name), "").unwrap();
        }
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("x.md"), "").unwrap();

        assert_eq!(rel_paths(temp.path()), rel_paths(temp.path()));
        assert_eq!(rel_paths(temp.path()), vec!["a.md", "m.md", "sub/x.md", "z.md"]);
    }

    #[test]
    fn test_allowed_extension_case_insensitive() {
        assert!(allowed_extension("DOC.MD", &md()));
        assert!(allowed_extension("doc.md", &md()));
        assert!(!allowed_extension("doc.txt", &md()));
        assert!(!allowed_extension("no-extension", &md()));
    }
}
