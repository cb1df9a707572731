//! Axum route handlers for the skill catalog, offers and stateless matching.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::matching::catalog::search_skills;
use crate::matching::filter::{FilterOptions, FilterSpec};
use crate::matching::matcher::{match_skills, MatchResult};
use crate::matching::ranker::{rank, Ranking};
use crate::matching::skill_set::{SkillProfile, SkillSet};
use crate::models::null_as_default;
use crate::models::offer::JobOffer;
use crate::models::skill::Skill;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SkillsQuery {
    /// Comma-separated skill names the user has selected.
    pub selected: Option<String>,
    /// Search term.
    pub q: Option<String>,
}

impl SkillsQuery {
    fn selected_names(&self) -> Vec<String> {
        self.selected
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    #[serde(default)]
    pub offer_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anti_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anti_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filters: FilterSpec,
    /// Snapshot to rank. When absent the current offers are fetched.
    #[serde(default)]
    pub offers: Option<Vec<JobOffer>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/skills?selected=a,b&q=term
pub async fn handle_list_skills(
    State(state): State<AppState>,
    Query(params): Query<SkillsQuery>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = state.skills.list_skills(&params.selected_names()).await?;
    let term = params.q.as_deref().unwrap_or_default();
    Ok(Json(search_skills(skills, term)))
}

/// GET /api/offers
pub async fn handle_list_offers(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobOffer>>, AppError> {
    Ok(Json(state.offers.list_offers().await?))
}

/// GET /api/offers/filter-options
pub async fn handle_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, AppError> {
    let offers = state.offers.list_offers().await?;
    Ok(Json(FilterOptions::from_offers(&offers)))
}

/// POST /api/match
///
/// Scores one requirement list against raw skill sets, exactly as given.
pub async fn handle_match(Json(req): Json<MatchRequest>) -> Json<MatchResult> {
    let selected: SkillSet = req.skills.into_iter().collect();
    let blocked: SkillSet = req.anti_skills.into_iter().collect();
    let verdict = match_skills(&req.required_skills, &selected, &blocked);

    Json(MatchResult {
        offer_id: req.offer_id.unwrap_or_default(),
        dealbreaker: verdict.dealbreaker,
        score: verdict.score,
    })
}

/// POST /api/offers/rank
///
/// Stateless ranking: profile and filters come from the body.
pub async fn handle_rank_offers(
    State(state): State<AppState>,
    Json(req): Json<RankRequest>,
) -> Result<Json<Ranking>, AppError> {
    req.filters.validate().map_err(AppError::Validation)?;

    let profile = SkillProfile::new(req.skills, req.anti_skills);
    let offers = match req.offers {
        Some(offers) => offers,
        None => state.offers.list_offers().await?,
    };

    Ok(Json(rank(&offers, &profile, &req.filters)))
}
