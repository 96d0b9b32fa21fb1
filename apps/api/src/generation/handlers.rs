//! Axum route handlers for CV generation and standalone ATS scoring.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cv::store::PgCvStore;
use crate::errors::AppError;
use crate::generation::generator::{
    generate_cv, validate_job_description, GenerateParams, OutputLanguage,
};
use crate::models::cv::{AtsScoreResponse, GeneratedCvContent};
use crate::profile::store::PgProfileStore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCvRequest {
    pub user_id: Uuid,
    pub job_description: String,
    #[serde(default)]
    pub language: OutputLanguage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCvResponse {
    pub cv_id: Uuid,
    pub cv: GeneratedCvContent,
    pub ats_score: i32,
    pub from_cache: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCvRequest {
    pub cv_content: GeneratedCvContent,
    pub job_description: String,
}

/// POST /api/v1/cv/generate
///
/// Runs the full pipeline: profile → cache → LLM → score → persist.
/// Identical repeats answer from the cache without touching the LLM.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateCvRequest>,
) -> Result<Json<GenerateCvResponse>, AppError> {
    let profiles = PgProfileStore::new(state.db.clone());
    let cvs = PgCvStore::new(state.db.clone());

    let outcome = generate_cv(
        &profiles,
        &cvs,
        &state.llm,
        state.scorer.as_ref(),
        GenerateParams {
            user_id: request.user_id,
            job_description: request.job_description,
            language: request.language,
        },
    )
    .await?;

    Ok(Json(GenerateCvResponse {
        cv_id: outcome.cv_id,
        cv: outcome.content,
        ats_score: outcome.ats_score,
        from_cache: outcome.from_cache,
    }))
}

/// POST /api/v1/cv/score
///
/// Re-scores a CV (possibly hand-edited) against a vacancy. Unlike the
/// scoring sub-step inside generation, a scorer failure here is fatal —
/// scoring is the whole operation.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<ScoreCvRequest>,
) -> Result<Json<AtsScoreResponse>, AppError> {
    validate_job_description(&request.job_description)?;

    let response = state
        .scorer
        .score(&request.cv_content, &request.job_description)
        .await?;

    Ok(Json(response))
}
