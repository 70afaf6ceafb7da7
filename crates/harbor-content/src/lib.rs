//! Content discovery core for the Harbor documentation engine.
//!
//! This crate provides the building blocks for serving a tree of markdown
//! documents:
//!
//! - [`PathResolver`]: confines client-supplied paths to the content root
//! - [`frontmatter`]: extracts the leading `---` metadata block of a document
//! - [`ContentTreeBuilder`]: ordered directory listings from mixed metadata
//!   sources (front matter for documents, sidecar files for directories)
//! - [`walk_documents`]: deterministic depth-first document enumeration
//!
//! All operations are synchronous filesystem reads; callers running inside an
//! async runtime invoke them directly the same way page rendering does.

mod error;
pub mod frontmatter;
mod path;
mod tree;
mod walk;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use path::PathResolver;
pub use tree::{ContentItem, ContentTreeBuilder, TreeOptions, title_from_name};
pub use walk::{WalkedDocument, walk_documents};
