//! Matcher: turns an offer's required skills plus the user's profile into a
//! dealbreaker verdict and a 0–100 match percentage.

use serde::{Deserialize, Serialize};

use crate::matching::skill_set::{SkillProfile, SkillSet};
use crate::models::offer::JobOffer;

/// Per-offer result of a compute pass. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub offer_id: String,
    pub dealbreaker: bool,
    pub score: u8,
}

/// Verdict over a bare requirement list, before it is tied to an offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillMatch {
    pub dealbreaker: bool,
    pub score: u8,
}

/// Display band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => MatchTier::High,
            70..=89 => MatchTier::Medium,
            _ => MatchTier::Low,
        }
    }
}

/// Scores one requirement list.
///
/// Algorithm:
/// 1. Any required skill in `blocked` → dealbreaker, score 0.
/// 2. Empty requirements → score 0 (nothing demonstrable to match).
/// 3. Otherwise `round(100 * matched / required.len())`, half-up.
///
/// Each occurrence counts: `["Java", "Java", "SQL"]` with `{"Java"}` is 2/3.
pub fn match_skills(required: &[String], selected: &SkillSet, blocked: &SkillSet) -> SkillMatch {
    if required.iter().any(|skill| blocked.contains(skill)) {
        return SkillMatch {
            dealbreaker: true,
            score: 0,
        };
    }

    let matched = required
        .iter()
        .filter(|skill| selected.contains(skill))
        .count();

    SkillMatch {
        dealbreaker: false,
        score: percentage(matched, required.len()),
    }
}

/// Scores `offer` against the user's current profile.
pub fn match_offer(offer: &JobOffer, profile: &SkillProfile) -> MatchResult {
    let verdict = match_skills(&offer.required_skills, profile.selected(), profile.blocked());
    MatchResult {
        offer_id: offer.id.clone(),
        dealbreaker: verdict.dealbreaker,
        score: verdict.score,
    }
}

/// `round(100 * part / whole)` with ties toward +∞, in integer arithmetic.
/// Zero `whole` scores 0.
fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole);
    // floor((100p/w) + 1/2) == floor((200p + w) / 2w)
    ((200 * part + whole) / (2 * whole)) as u8
}
