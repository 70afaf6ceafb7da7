//! Structure API endpoint.
//!
//! Returns the ordered listing of a directory under the content root.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use harbor_content::{ContentItem, PathResolver};
use serde::Serialize;

use crate::error::StructureError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Response for GET /api/structure/{path}.
#[derive(Serialize)]
pub(crate) struct StructureResponse {
    /// Requested directory (URL form, with leading slash).
    path: String,
    /// Ordered directory entries.
    items: Vec<ContentItem>,
    /// Number of entries.
    count: usize,
}

/// Handle GET /api/structure/ (content root).
pub(crate) async fn get_root_structure(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StructureResponse>, StructureError> {
    structure_impl(String::new(), &state)
}

/// Handle GET /api/structure/{path}.
pub(crate) async fn get_structure(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<StructureResponse>, StructureError> {
    structure_impl(path, &state)
}

/// Shared implementation for directory listings.
fn structure_impl(
    path: String,
    state: &AppState,
) -> Result<Json<StructureResponse>, StructureError> {
    let items = state
        .tree
        .list(&path)
        .map_err(|e| StructureError::from_content(e, state.verbose))?;

    // `list` already validated the path, so normalization cannot fail here.
    let normalized = PathResolver::normalize(&path).unwrap_or_default();

    tracing::debug!(path = %normalized, count = items.len(), "Directory listing");

    Ok(Json(StructureResponse {
        path: to_url_path(&normalized),
        count: items.len(),
        items,
    }))
}
