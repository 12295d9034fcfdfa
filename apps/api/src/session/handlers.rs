use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::editor::EditIntent;
use crate::errors::AppError;
use crate::export::run_export;
use crate::navigator::scroll::DEFAULT_FRAME_MS;
use crate::navigator::section::UnknownSection;
use crate::navigator::{
    LayoutSnapshot, ScrollAnimation, ScrollContainer, Section, ViewportSnapshot,
    VisibilityEvent,
};
use crate::preview::{render_preview, Preview};
use crate::session::SessionView;
use crate::state::AppState;

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInfo {
    pub id: Section,
    pub label: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub active_section: Section,
}

#[derive(Deserialize)]
pub struct VisibilityBatch {
    pub events: Vec<VisibilityEvent>,
}

#[derive(Deserialize, Default)]
pub struct ScrollRequest {
    /// Absent while the form pane is not mounted.
    #[serde(default)]
    pub container: Option<LayoutSnapshot>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollResponse {
    pub animation: Option<ScrollAnimation>,
    pub frames: Vec<f64>,
}

/// GET /api/v1/sections
pub async fn handle_list_sections() -> Json<Vec<SectionInfo>> {
    Json(
        Section::ALL
            .into_iter()
            .map(|id| SectionInfo {
                id,
                label: id.label(),
            })
            .collect(),
    )
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let view = state.sessions.create(state.navigator).await;
    info!("Created session {}", view.session_id);
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .read(id, |s| s.view())
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(session_not_found(id));
    }
    info!("Discarded session {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/edits
pub async fn handle_apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(intent): Json<EditIntent>,
) -> Result<Json<SessionView>, AppError> {
    let (changed, view) = state
        .sessions
        .update(id, |s| (s.apply(&intent), s.view()))
        .await
        .ok_or_else(|| session_not_found(id))?;
    info!(
        session = %id,
        op = intent.name(),
        section = %intent.section(),
        changed,
        revision = view.revision,
        "Applied edit"
    );
    Ok(Json(view))
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Preview>, AppError> {
    let preview = state
        .sessions
        .read(id, |s| render_preview(&s.document()))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(preview))
}

/// GET /api/v1/sessions/:id/preview.html
pub async fn handle_get_preview_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let html = state
        .sessions
        .read(id, |s| render_preview(&s.document()).to_html())
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Html(html))
}

/// POST /api/v1/sessions/:id/navigation/visibility
pub async fn handle_visibility(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(batch): Json<VisibilityBatch>,
) -> Result<Json<NavigationView>, AppError> {
    let active_section = state
        .sessions
        .update(id, |s| s.handle_visibility(&batch.events))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(NavigationView { active_section }))
}

/// POST /api/v1/sessions/:id/navigation/viewport
pub async fn handle_viewport(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(snapshot): Json<ViewportSnapshot>,
) -> Result<Json<NavigationView>, AppError> {
    let active_section = state
        .sessions
        .update(id, |s| s.observe_viewport(&snapshot))
        .await
        .ok_or_else(|| session_not_found(id))?;
    Ok(Json(NavigationView { active_section }))
}

/// POST /api/v1/sessions/:id/navigation/scroll/:section
///
/// Plans the smooth scroll only; the active section follows from later visibility reports.
/// A request without a usable body means the form pane is not mounted.
pub async fn handle_scroll(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
    body: Option<Json<ScrollRequest>>,
) -> Result<Json<ScrollResponse>, AppError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let section: Section = section
        .parse()
        .map_err(|e: UnknownSection| AppError::Validation(e.to_string()))?;

    let animation = state
        .sessions
        .read(id, |s| {
            let container = req.container.as_ref().map(|c| c as &dyn ScrollContainer);
            s.navigator().scroll_to_section(container, section)
        })
        .await
        .ok_or_else(|| session_not_found(id))?;

    let frames = animation
        .map(|a| a.frames(DEFAULT_FRAME_MS))
        .unwrap_or_default();
    Ok(Json(ScrollResponse { animation, frames }))
}

/// POST /api/v1/sessions/:id/export
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    // Snapshot under the lock, then release it before awaiting the adapter.
    let (preview, guard) = state
        .sessions
        .read(id, |s| (render_preview(&s.document()), s.export_guard()))
        .await
        .ok_or_else(|| session_not_found(id))?;

    info!("Starting export for session {id}");
    let artifact = run_export(state.exporter.as_ref(), &guard, &preview).await?;

    let disposition =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", artifact.file_name))
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
