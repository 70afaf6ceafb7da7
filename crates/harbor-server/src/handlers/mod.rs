//! HTTP request handlers.

pub(crate) mod health;
pub(crate) mod related;
pub(crate) mod structure;

/// Convert internal path (without leading slash) to URL path (with leading slash).
///
/// The core stores paths without leading slashes (e.g., "guide", "domain/page",
/// "" for root), but the frontend expects URL paths with leading slashes.
pub(crate) fn to_url_path(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else {
        format!("/{path}")
    }
}
