use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::assist::import::{apply_import, import_resume};
use crate::assist::suggest::{suggest, SuggestRequest, Suggestions};
use crate::assist::summarize::{summarize, SummarizeInput};
use crate::errors::AppError;
use crate::extract::extract_text;
use crate::form::check_summary_prerequisites;
use crate::resume::{DocumentEdit, FieldPath};
use crate::session::handlers::DocumentView;
use crate::session::{ActionKind, InFlightGuard};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

fn begin_ai(state: &AppState, id: Uuid) -> Result<InFlightGuard, AppError> {
    state
        .in_flight
        .try_begin(id, ActionKind::Ai)
        .ok_or(AppError::ActionInProgress("AI generation"))
}

/// POST /api/v1/sessions/:id/summary
///
/// The model is only called once the document has a name and at least one
/// experience row with a title or company.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentView>, AppError> {
    let _guard = begin_ai(&state, id)?;
    let session = state.sessions.load(id).await?;
    if let Err(missing) = check_summary_prerequisites(&session.document) {
        warn!(session_id = %id, "Summary requested without name or experience");
        return Err(missing.into());
    }

    info!(session_id = %id, "Generating summary");

    let input = SummarizeInput::from_document(&session.document);
    let summary = summarize(state.model.as_ref(), &input).await?;

    let session = state
        .sessions
        .update(id, |s| {
            s.document = s.document.apply(&DocumentEdit::Set {
                path: FieldPath::Summary,
                value: summary,
            })?;
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(Json(DocumentView::new(&state, session)))
}

/// POST /api/v1/suggestions
pub async fn handle_suggest(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<Suggestions>, AppError> {
    if req.job_title.trim().is_empty() || req.industry.trim().is_empty() {
        return Err(AppError::Validation(
            "Job title and industry are required".to_string(),
        ));
    }
    let suggestions = suggest(state.model.as_ref(), &req).await?;
    Ok(Json(suggestions))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub improved_text: String,
    #[serde(flatten)]
    pub view: DocumentView,
}

/// POST /api/v1/sessions/:id/import
///
/// Multipart upload with a single `resume` file field. The file is reduced
/// to text, rewritten by the model and merged into the draft.
pub async fn handle_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let _guard = begin_ai(&state, id)?;
    state.sessions.load(id).await?;

    let (content_type, data) = read_resume_field(&mut multipart).await?;
    info!(session_id = %id, %content_type, bytes = data.len(), "Importing resume upload");
    let text = tokio::task::spawn_blocking(move || extract_text(&content_type, &data))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    let outcome = import_resume(state.model.as_ref(), &text).await?;

    let session = state
        .sessions
        .update(id, |s| {
            s.document = apply_import(&s.document, &outcome.json_data)?;
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(Json(ImportResponse {
        improved_text: outcome.improved_text,
        view: DocumentView::new(&state, session),
    }))
}

async fn read_resume_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        return Ok((content_type, data.to_vec()));
    }
    Err(AppError::Validation("No file uploaded".to_string()))
}
