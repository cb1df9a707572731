pub mod health;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers as matching;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/stats", get(stats::stats_handler))
        // Catalog and stateless matching
        .route("/api/skills", get(matching::handle_list_skills))
        .route("/api/offers", get(matching::handle_list_offers))
        .route(
            "/api/offers/filter-options",
            get(matching::handle_filter_options),
        )
        .route("/api/offers/rank", post(matching::handle_rank_offers))
        .route("/api/match", post(matching::handle_match))
        // User profile
        .route(
            "/api/users/:user_id/skills",
            get(profile::handle_get_profile).post(profile::handle_save_profile),
        )
        .route(
            "/api/users/:user_id/skills/toggle",
            post(profile::handle_toggle_skill),
        )
        .route("/api/users/:user_id/offers", get(profile::handle_user_offers))
        .with_state(state)
}
