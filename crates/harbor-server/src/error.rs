//! API error responses.
//!
//! Each endpoint has a fixed error body shape consumed by the frontend, so
//! errors are mapped per endpoint rather than through one shared type. The
//! `details`/`message` fields of 500 responses carry the source error only
//! when the server runs verbose.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use harbor_content::ContentError;

/// Error responses for `GET /api/related`.
#[derive(Debug)]
pub(crate) enum RelatedError {
    MissingPath,
    InvalidPath,
    NotFound,
    Internal { details: Option<String> },
}

impl RelatedError {
    /// Map a core error, keeping details only in verbose mode.
    pub(crate) fn from_content(err: ContentError, verbose: bool) -> Self {
        match err {
            ContentError::MissingPath => Self::MissingPath,
            ContentError::InvalidPath(_) => Self::InvalidPath,
            ContentError::NotFound(_) => Self::NotFound,
            other => Self::Internal {
                details: verbose.then(|| other.to_string()),
            },
        }
    }
}

impl IntoResponse for RelatedError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::MissingPath => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Missing document path", "related": []}),
            ),
            Self::InvalidPath => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Invalid document path", "related": []}),
            ),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Document not found", "related": []}),
            ),
            Self::Internal { details } => {
                let mut body = json!({"error": "Failed to get related documents", "related": []});
                if let (Some(obj), Some(details)) = (body.as_object_mut(), details) {
                    obj.insert("details".to_owned(), json!(details));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Error responses for `GET /api/structure`.
#[derive(Debug)]
pub(crate) enum StructureError {
    InvalidPath,
    NotFound,
    NotADirectory,
    Internal { message: Option<String> },
}

impl StructureError {
    /// Map a core error, keeping the message only in verbose mode.
    pub(crate) fn from_content(err: ContentError, verbose: bool) -> Self {
        match err {
            ContentError::InvalidPath(_) | ContentError::MissingPath => Self::InvalidPath,
            ContentError::NotFound(_) => Self::NotFound,
            ContentError::NotADirectory(_) => Self::NotADirectory,
            other => Self::Internal {
                message: verbose.then(|| other.to_string()),
            },
        }
    }
}

impl IntoResponse for StructureError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::InvalidPath => (StatusCode::BAD_REQUEST, json!({"error": "Invalid path"})),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                json!({"error": "Directory not found"}),
            ),
            Self::NotADirectory => (
                StatusCode::BAD_REQUEST,
                json!({"error": "Path is not a directory"}),
            ),
            Self::Internal { message } => {
                let mut body = json!({"error": "Internal Server Error"});
                if let (Some(obj), Some(message)) = (body.as_object_mut(), message) {
                    obj.insert("message".to_owned(), json!(message));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_error_hides_details_without_verbose() {
        let err = RelatedError::from_content(
            ContentError::Io(std::io::Error::other("disk on fire")),
            false,
        );
        assert!(matches!(err, RelatedError::Internal { details: None }));
    }

    #[test]
    fn test_related_error_keeps_details_when_verbose() {
        let err = RelatedError::from_content(
            ContentError::Io(std::io::Error::other("disk on fire")),
            true,
        );
        match err {
            RelatedError::Internal { details: Some(d) } => assert!(d.contains("disk on fire")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_structure_error_mapping() {
        assert!(matches!(
            StructureError::from_content(ContentError::NotADirectory("a".to_owned()), false),
            StructureError::NotADirectory
        ));
        assert!(matches!(
            StructureError::from_content(ContentError::NotFound("a".to_owned()), false),
            StructureError::NotFound
        ));
        assert!(matches!(
            StructureError::from_content(ContentError::InvalidPath("..".to_owned()), false),
            StructureError::InvalidPath
        ));
    }
}
