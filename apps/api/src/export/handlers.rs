use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{content_disposition, export_capture, CaptureSize, ExportFormat};
use crate::form::validate_document;
use crate::session::ActionKind;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/export/:format?width=&height=
///
/// Body: PNG capture of the preview. `width`/`height` are the preview's CSS
/// size; the capture must be `EXPORT_SCALE` times larger.
pub async fn handle_export(
    State(state): State<AppState>,
    Path((id, format)): Path<(Uuid, String)>,
    Query(size): Query<CaptureSize>,
    capture: Bytes,
) -> Result<Response, AppError> {
    let format: ExportFormat = format.parse()?;
    let _guard = state
        .in_flight
        .try_begin(id, ActionKind::Export)
        .ok_or(AppError::ActionInProgress("Export"))?;

    let session = state.sessions.load(id).await?;
    if session.template_id.is_none() {
        return Err(AppError::Validation(
            "Open a template before exporting".to_string(),
        ));
    }
    let report = validate_document(&session.document);
    if !report.valid {
        return Err(AppError::InvalidFields(report));
    }

    info!(session_id = %id, ?format, "Exporting resume");
    let scale = state.config.export_scale;
    let name = session.document.contact.name;
    let artifact = tokio::task::spawn_blocking(move || {
        export_capture(&capture, size, scale, format, &name)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let disposition = content_disposition(&artifact.filename);
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
