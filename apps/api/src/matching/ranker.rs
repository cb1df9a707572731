//! Ranker/Filter: scores every offer, vetoes dealbreakers, applies the
//! display filters and orders the survivors by score.
//!
//! Always a full recompute over the current snapshot. Offer lists are in the
//! thousands and the pass is O(offers × required skills).

use serde::Serialize;

use crate::matching::filter::FilterSpec;
use crate::matching::matcher::{match_offer, MatchTier};
use crate::matching::skill_set::SkillProfile;
use crate::models::offer::JobOffer;

/// An offer as displayed: the listing plus its computed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredOffer {
    #[serde(flatten)]
    pub offer: JobOffer,
    pub score: u8,
    pub tier: MatchTier,
}

/// Ranked offers plus how many fell out at each stage.
/// `total == blocked + hidden + offers.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub offers: Vec<ScoredOffer>,
    pub total: usize,
    /// Excluded by a blocked skill.
    pub blocked: usize,
    /// Passed the veto but failed a filter.
    pub hidden: usize,
}

/// Runs the full pipeline and keeps the per-stage counts.
///
/// Order is score descending; equal scores keep snapshot (fetch) order.
pub fn rank(offers: &[JobOffer], profile: &SkillProfile, filters: &FilterSpec) -> Ranking {
    let mut blocked = 0;
    let mut hidden = 0;
    let mut ranked = Vec::with_capacity(offers.len());

    for offer in offers {
        let result = match_offer(offer, profile);
        if result.dealbreaker {
            blocked += 1;
            continue;
        }
        if !filters.admits(offer, result.score) {
            hidden += 1;
            continue;
        }
        ranked.push(ScoredOffer {
            offer: offer.clone(),
            score: result.score,
            tier: MatchTier::from_score(result.score),
        });
    }

    // `sort_by` is stable, so ties stay in fetch order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    Ranking {
        offers: ranked,
        total: offers.len(),
        blocked,
        hidden,
    }
}
