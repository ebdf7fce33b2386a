use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::Template;
use crate::errors::AppError;
use crate::form::{compute_completeness_report, validate_document, CompletenessReport, ValidationReport};
use crate::render::{render, RenderedResume};
use crate::resume::{DocumentEdit, ResumeDocument};
use crate::session::{check_editor_access, EditorAccess, Session, SessionStore};
use crate::state::AppState;

/// Document snapshot plus everything the editor derives from it.
#[derive(Debug, Serialize)]
pub struct DocumentView {
    pub session_id: Uuid,
    pub template_id: Option<String>,
    pub document: ResumeDocument,
    pub validation: ValidationReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<CompletenessReport>,
    pub updated_at: DateTime<Utc>,
}

impl DocumentView {
    pub fn new(state: &AppState, session: Session) -> Self {
        let completeness = selected_template(state, &session)
            .map(|template| compute_completeness_report(template, &session.document));
        Self {
            session_id: session.id,
            template_id: session.template_id,
            validation: validate_document(&session.document),
            document: session.document,
            completeness,
            updated_at: session.updated_at,
        }
    }
}

fn selected_template<'a>(state: &'a AppState, session: &Session) -> Option<&'a Template> {
    session
        .template_id
        .as_deref()
        .and_then(|id| state.catalog.get(id))
}

fn find_template(state: &AppState, template_id: &str) -> Result<Template, AppError> {
    state
        .catalog
        .get(template_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Session>), AppError> {
    let session = state.sessions.create().await?;
    info!(session_id = %session.id, "Session created");
    Ok((StatusCode::CREATED, Json(session)))
}

/// Body of the editor and purchase endpoints.
#[derive(Debug, Serialize)]
#[serde(tag = "access", rename_all = "snake_case")]
pub enum EditorResponse {
    Granted {
        template: Template,
        document: ResumeDocument,
    },
    PurchaseRequired {
        template_id: String,
        price: u32,
    },
}

/// Selects `template` for the session and seeds placeholder rows for the
/// collections it lists.
async fn open_editor(
    sessions: &SessionStore,
    id: Uuid,
    template: Template,
    unlock: bool,
) -> Result<EditorResponse, AppError> {
    let session = sessions
        .update(id, |s| {
            if unlock {
                s.entitlements.unlock(&template.id);
            }
            s.template_id = Some(template.id.clone());
            s.document = s.document.with_placeholders(&template.sections);
            Ok::<_, AppError>(())
        })
        .await?;

    Ok(EditorResponse::Granted {
        template,
        document: session.document,
    })
}

/// GET /api/v1/sessions/:id/editor/:template_id
///
/// Paid templates the session has not unlocked return `purchase_required`
/// and leave the session untouched.
pub async fn handle_open_editor(
    State(state): State<AppState>,
    Path((id, template_id)): Path<(Uuid, String)>,
) -> Result<Json<EditorResponse>, AppError> {
    let template = find_template(&state, &template_id)?;
    let session = state.sessions.load(id).await?;

    match check_editor_access(&template, &session.entitlements) {
        EditorAccess::Granted => {
            info!(session_id = %id, %template_id, "Opening editor");
            Ok(Json(open_editor(&state.sessions, id, template, false).await?))
        }
        EditorAccess::PurchaseRequired { template_id, price } => {
            info!(session_id = %id, %template_id, "Editor access requires purchase");
            Ok(Json(EditorResponse::PurchaseRequired { template_id, price }))
        }
    }
}

/// POST /api/v1/sessions/:id/purchases/:template_id
///
/// Records a confirmed purchase and opens the editor. Payment itself happens
/// outside this service.
pub async fn handle_purchase(
    State(state): State<AppState>,
    Path((id, template_id)): Path<(Uuid, String)>,
) -> Result<Json<EditorResponse>, AppError> {
    let template = find_template(&state, &template_id)?;
    if !template.is_paid() {
        warn!(session_id = %id, %template_id, "Purchase attempted for a free template");
        return Err(AppError::Validation(format!("Template {template_id} is free")));
    }

    let response = open_editor(&state.sessions, id, template, true).await?;
    info!(session_id = %id, %template_id, "Template unlocked");
    Ok(Json(response))
}

/// GET /api/v1/sessions/:id/document
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentView>, AppError> {
    let session = state.sessions.load(id).await?;
    Ok(Json(DocumentView::new(&state, session)))
}

#[derive(Debug, Deserialize)]
pub struct EditBatch {
    pub edits: Vec<DocumentEdit>,
}

/// PATCH /api/v1/sessions/:id/document
///
/// Applies the batch atomically. Content errors do not block the edit; they
/// are reported in `validation`.
pub async fn handle_edit_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(batch): Json<EditBatch>,
) -> Result<Json<DocumentView>, AppError> {
    let session = state
        .sessions
        .update(id, |s| {
            s.document = s.document.apply_all(&batch.edits)?;
            Ok::<_, AppError>(())
        })
        .await?;
    Ok(Json(DocumentView::new(&state, session)))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RenderedResume>, AppError> {
    let session = state.sessions.load(id).await?;
    let template = selected_template(&state, &session)
        .ok_or_else(|| AppError::Validation("No template selected for this session".into()))?;
    Ok(Json(render(template, &session.document)))
}
