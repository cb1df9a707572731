//! Axum route handlers for a user's skill profile and personal ranking.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::filter::FilterSpec;
use crate::matching::ranker::{rank, Ranking};
use crate::matching::skill_set::{SkillProfile, SkillState, ToggleAction};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub skill: String,
    pub action: ToggleAction,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub skill: String,
    pub state: SkillState,
    pub profile: SkillProfile,
}

/// Unsaved edits win over the store; no saved profile means empty sets.
async fn current_profile(state: &AppState, user_id: Uuid) -> Result<SkillProfile, AppError> {
    match state.profile_saver.pending(user_id).await {
        Some(profile) => Ok(profile),
        None => state.profiles.load(user_id).await,
    }
}

/// GET /api/users/:user_id/skills
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<SkillProfile>, AppError> {
    Ok(Json(current_profile(&state, user_id).await?))
}

/// POST /api/users/:user_id/skills
///
/// Full replace, written immediately. Overlapping names stay selected.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(profile): Json<SkillProfile>,
) -> Result<Json<SkillProfile>, AppError> {
    let saved = state.profile_saver.save_now(user_id, profile).await?;
    Ok(Json(saved))
}

/// POST /api/users/:user_id/skills/toggle
///
/// Applies one gesture and schedules a debounced save.
pub async fn handle_toggle_skill(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    if req.skill.trim().is_empty() {
        return Err(AppError::Validation("skill cannot be empty".to_string()));
    }

    let mut profile = current_profile(&state, user_id).await?;
    let new_state = profile.toggle(&req.skill, req.action);
    state.profile_saver.schedule(user_id, profile.clone()).await;

    Ok(Json(ToggleResponse {
        skill: req.skill,
        state: new_state,
        profile,
    }))
}

/// GET /api/users/:user_id/offers
///
/// Ranks the current offer snapshot against the user's latest profile.
pub async fn handle_user_offers(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(filters): Query<FilterSpec>,
) -> Result<Json<Ranking>, AppError> {
    filters.validate().map_err(AppError::Validation)?;

    let profile = current_profile(&state, user_id).await?;
    let offers = state.offers.list_offers().await?;

    Ok(Json(rank(&offers, &profile, &filters)))
}
