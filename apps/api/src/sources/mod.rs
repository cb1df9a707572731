//! Boundaries to the data the matcher reads and the profile it persists.
//!
//! Each collaborator is an `async_trait` object so `AppState` can carry
//! `Arc<dyn …>` and tests can swap in the in-memory double.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skill_set::SkillProfile;
use crate::models::offer::JobOffer;
use crate::models::skill::Skill;

/// Read access to the skill catalog.
#[async_trait]
pub trait SkillSource: Send + Sync {
    /// All skills, most frequent first. With a non-empty `selected`, frequency
    /// is co-occurrence with those skills instead of raw offer count.
    async fn list_skills(&self, selected: &[String]) -> Result<Vec<Skill>, AppError>;

    async fn count_skills(&self) -> Result<i64, AppError>;
}

/// Read access to the current offer snapshot.
#[async_trait]
pub trait OfferSource: Send + Sync {
    async fn list_offers(&self) -> Result<Vec<JobOffer>, AppError>;

    async fn count_offers(&self) -> Result<i64, AppError>;
}

/// Persistence for a user's selected/blocked skills.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns an empty profile when nothing has been saved for `user_id`.
    async fn load(&self, user_id: Uuid) -> Result<SkillProfile, AppError>;

    /// Replaces the stored profile and returns it as stored.
    async fn save(&self, user_id: Uuid, profile: &SkillProfile) -> Result<SkillProfile, AppError>;
}
