//! Axum route handlers for stored CV records: history, detail, deletion
//! and export.

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::export::{render_export, TemplateKind};
use crate::cv::store::{CvStore, PgCvStore};
use crate::errors::AppError;
use crate::models::cv::{CvRow, CvSummary, GeneratedCvContent};
use crate::state::AppState;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub user_id: Uuid,
    pub template: TemplateKind,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub url: String,
}

/// GET /api/v1/cv
///
/// CV history for a user, newest first, without content blobs.
pub async fn handle_list_cvs(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<CvSummary>>, AppError> {
    let store = PgCvStore::new(state.db.clone());
    Ok(Json(store.list(params.user_id).await?))
}

/// GET /api/v1/cv/:id
///
/// Full CV record. The (user, id) filter keeps users out of each other's
/// records even with a known id.
pub async fn handle_get_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<CvRow>, AppError> {
    let store = PgCvStore::new(state.db.clone());
    let cv = store
        .get(params.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;
    Ok(Json(cv))
}

/// DELETE /api/v1/cv/:id
///
/// Deletes the record, then cleans up exported files best-effort — a storage
/// failure is logged and never surfaced once the row is gone.
pub async fn handle_delete_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    let store = PgCvStore::new(state.db.clone());
    let deleted = store.delete(params.user_id, id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("CV {id} not found")));
    }

    storage::delete_exports(&state.s3, &state.config.s3_bucket, params.user_id, id).await;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/cv/:id/export
///
/// Renders the stored CV with the requested template, uploads it to the
/// private bucket (overwriting any previous export of the same pair) and
/// returns a 1-hour signed download URL.
pub async fn handle_export_cv(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let store = PgCvStore::new(state.db.clone());
    let cv = store
        .get(request.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("CV {id} not found")))?;

    let content: GeneratedCvContent = serde_json::from_value(cv.generated_content)
        .context("stored CV content does not match the document schema")?;
    let document = render_export(&content, request.template);

    let key = storage::export_key(request.user_id, id, request.template.as_str());
    storage::upload_export(
        &state.s3,
        &state.config.s3_bucket,
        &key,
        document.into_bytes(),
        "text/plain; charset=utf-8",
    )
    .await?;

    let url = storage::presign_download(&state.s3, &state.config.s3_bucket, &key).await?;

    Ok(Json(ExportResponse { url }))
}
