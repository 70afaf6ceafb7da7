//! Tag-based related-document ranking.
//!
//! [`RelevanceEngine`] scans every document under the content root and ranks
//! candidates by the number of tags they share with a target document.
//! Rankings are memoized in a [`RelatedCache`], a time-bounded in-memory map
//! constructed per instance so tests and servers own isolated caches.

mod cache;
mod engine;

pub use cache::RelatedCache;
pub use engine::{RelatedDocument, RelatedResult, RelevanceEngine};
