//! Axum route handlers for the professional profile.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{ProfileInput, ProfileRow};
use crate::profile::store::{PgProfileStore, ProfileStore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpsertRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub profile: ProfileInput,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileRow>, AppError> {
    let store = PgProfileStore::new(state.db.clone());
    let profile = store
        .get(params.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Full-document replace: validates the payload, then upserts. Partial
/// patches are not supported by design.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileUpsertRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    request.profile.validate().map_err(AppError::Validation)?;

    let store = PgProfileStore::new(state.db.clone());
    let profile = store.upsert(request.user_id, &request.profile).await?;
    Ok(Json(profile))
}
