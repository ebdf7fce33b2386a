use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assist::import::ApplyImportError;
use crate::assist::AiError;
use crate::export::ExportError;
use crate::extract::ExtractionError;
use crate::form::{MissingInformation, ValidationReport};
use crate::resume::EditError;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Please correct the highlighted fields")]
    InvalidFields(ValidationReport),

    #[error(transparent)]
    MissingInformation(#[from] MissingInformation),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Extraction(String),

    #[error(transparent)]
    AiGeneration(#[from] AiError),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("{0} already in progress for this session")]
    ActionInProgress(&'static str),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidFields(report) => {
                let body = Json(json!({
                    "error": {
                        "code": "INVALID_FIELDS",
                        "message": self.to_string(),
                        "fields": report.errors,
                    }
                }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
            AppError::MissingInformation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_INFORMATION",
                e.to_string(),
            ),
            AppError::UnsupportedFileType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FILE_TYPE",
                msg.clone(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILED",
                msg.clone(),
            ),
            AppError::AiGeneration(e) => {
                tracing::error!("AI generation error: {}", e.detail);
                (StatusCode::BAD_GATEWAY, "AI_GENERATION_FAILED", e.to_string())
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "Export failed".to_string(),
                )
            }
            AppError::ActionInProgress(_) => {
                (StatusCode::CONFLICT, "ACTION_IN_PROGRESS", self.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => AppError::NotFound(format!("Session {id} not found")),
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<EditError> for AppError {
    fn from(err: EditError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ApplyImportError> for AppError {
    fn from(err: ApplyImportError) -> Self {
        AppError::Internal(err.into())
    }
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedType(_) => AppError::UnsupportedFileType(err.to_string()),
            ExtractionError::Failed(_) | ExtractionError::Empty => {
                AppError::Extraction(err.to_string())
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::EncodePng(_) | ExportError::EncodePdf(_) => {
                AppError::Export(err.to_string())
            }
            _ => AppError::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::from(MissingInformation), StatusCode::UNPROCESSABLE_ENTITY),
            (
                AppError::from(ExtractionError::UnsupportedType("image/gif".into())),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (AppError::from(ExtractionError::Empty), StatusCode::UNPROCESSABLE_ENTITY),
            (AppError::from(AiError::new("timeout")), StatusCode::BAD_GATEWAY),
            (AppError::ActionInProgress("AI generation"), StatusCode::CONFLICT),
            (
                AppError::from(ExportError::EncodePdf("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::from(ExportError::EmptyCapture), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_session_not_found_maps_to_404() {
        let err = AppError::from(SessionError::NotFound(uuid::Uuid::nil()));
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
