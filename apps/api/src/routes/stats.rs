use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub offers: i64,
    pub skills: i64,
}

/// Counts are published rounded down to the hundred ("1200+ offers").
fn round_down_to_hundred(count: i64) -> i64 {
    (count.max(0) / 100) * 100
}

/// GET /api/stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let offers = state.offers.count_offers().await?;
    let skills = state.skills.count_skills().await?;

    Ok(Json(StatsResponse {
        offers: round_down_to_hundred(offers),
        skills: round_down_to_hundred(skills),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_down_to_hundred() {
        assert_eq!(round_down_to_hundred(0), 0);
        assert_eq!(round_down_to_hundred(99), 0);
        assert_eq!(round_down_to_hundred(100), 100);
        assert_eq!(round_down_to_hundred(1_299), 1_200);
    }
}
