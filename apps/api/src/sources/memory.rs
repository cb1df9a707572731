use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skill_set::SkillProfile;
use crate::models::offer::JobOffer;
use crate::models::skill::Skill;
use crate::sources::{OfferSource, ProfileStore, SkillSource};

/// In-memory stand-in for `PgStore`. Counts saves so debounce tests can
/// assert how many writes reached the store.
#[derive(Default)]
pub struct MemoryStore {
    pub skills: Vec<Skill>,
    pub offers: Vec<JobOffer>,
    profiles: Mutex<HashMap<Uuid, SkillProfile>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(skills: Vec<Skill>, offers: Vec<JobOffer>) -> Self {
        Self {
            skills,
            offers,
            ..Default::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub async fn stored(&self, user_id: Uuid) -> Option<SkillProfile> {
        self.profiles.lock().await.get(&user_id).cloned()
    }
}

#[async_trait]
impl SkillSource for MemoryStore {
    async fn list_skills(&self, _selected: &[String]) -> Result<Vec<Skill>, AppError> {
        Ok(self.skills.clone())
    }

    async fn count_skills(&self) -> Result<i64, AppError> {
        Ok(self.skills.len() as i64)
    }
}

#[async_trait]
impl OfferSource for MemoryStore {
    async fn list_offers(&self) -> Result<Vec<JobOffer>, AppError> {
        Ok(self.offers.clone())
    }

    async fn count_offers(&self) -> Result<i64, AppError> {
        Ok(self.offers.len() as i64)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn load(&self, user_id: Uuid) -> Result<SkillProfile, AppError> {
        Ok(self.stored(user_id).await.unwrap_or_default())
    }

    async fn save(&self, user_id: Uuid, profile: &SkillProfile) -> Result<SkillProfile, AppError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.profiles.lock().await.insert(user_id, profile.clone());
        Ok(profile.clone())
    }
}
