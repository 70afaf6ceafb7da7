//! Related documents API endpoint.
//!
//! Ranks documents by tag overlap with a target document, consulting the
//! shared TTL cache unless the client opts out with `skipCache`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use harbor_related::RelatedDocument;
use serde::{Deserialize, Serialize};

use crate::error::RelatedError;
use crate::state::AppState;

/// Query parameters for GET /api/related.
#[derive(Deserialize)]
pub(crate) struct RelatedParams {
    /// Target document path.
    path: Option<String>,
    /// Maximum number of results (default from config).
    limit: Option<usize>,
    /// Bypass the cache and rescan.
    #[serde(rename = "skipCache")]
    skip_cache: Option<bool>,
}

/// Response for GET /api/related.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelatedResponse {
    /// Ranked related documents.
    related: Vec<RelatedDocument>,
    /// Whether the ranking came from cache.
    from_cache: bool,
}

/// Handle GET /api/related.
pub(crate) async fn get_related(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RelatedParams>,
) -> Result<Json<RelatedResponse>, RelatedError> {
    let Some(path) = params.path.filter(|p| !p.trim().is_empty()) else {
        return Err(RelatedError::MissingPath);
    };
    let limit = params.limit.unwrap_or(state.default_limit);
    let skip_cache = params.skip_cache.unwrap_or(false) || !state.cache_enabled;

    let result = state
        .engine
        .find_related(&path, limit, skip_cache)
        .map_err(|e| RelatedError::from_content(e, state.verbose))?;

    tracing::debug!(
        path = %path,
        results = result.related.len(),
        from_cache = result.from_cache,
        "Related documents lookup"
    );

    Ok(Json(RelatedResponse {
        related: result.related,
        from_cache: result.from_cache,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_response_serialization() {
        let response = RelatedResponse {
            related: vec![RelatedDocument {
                path: "docs/b.md".to_owned(),
                title: "B".to_owned(),
                common_tags: vec!["x".to_owned()],
                common_tags_count: 1,
                relevance: 1,
            }],
            from_cache: true,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["fromCache"], true);
        assert_eq!(json["related"][0]["path"], "docs/b.md");
        assert_eq!(json["related"][0]["commonTagsCount"], 1);
    }

    #[test]
    fn test_params_accept_camel_case_skip_cache() {
        let params: RelatedParams =
            serde_json::from_str(r#"{"path": "a.md", "limit": 3, "skipCache": true}"#).unwrap();
        assert_eq!(params.path.as_deref(), Some("a.md"));
        assert_eq!(params.limit, Some(3));
        assert_eq!(params.skip_cache, Some(true));
    }
}
