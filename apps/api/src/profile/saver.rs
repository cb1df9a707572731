//! Trailing-edge debounced persistence for skill profiles.
//!
//! Rapid toggles for one user collapse into a single `ProfileStore::save`
//! fired `delay` after the last change. Until then the unsaved profile is
//! served from here, so reads never go backwards. Writes are serialized, and a
//! background write whose profile has since been replaced is dropped, so an
//! older profile never lands on top of a newer one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skill_set::SkillProfile;
use crate::sources::ProfileStore;

struct Pending {
    generation: u64,
    profile: SkillProfile,
}

#[derive(Default)]
struct SaverState {
    /// Global so a timer from a flushed-and-recreated entry never matches.
    next_generation: u64,
    pending: HashMap<Uuid, Pending>,
    /// Newest generation ever staged per user, pending or already written.
    latest: HashMap<Uuid, u64>,
}

struct Inner {
    store: Arc<dyn ProfileStore>,
    delay: Duration,
    state: Mutex<SaverState>,
    write_lock: Mutex<()>,
}

#[derive(Clone)]
pub struct ProfileSaver {
    inner: Arc<Inner>,
}

impl ProfileSaver {
    pub fn new(store: Arc<dyn ProfileStore>, delay: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                delay,
                state: Mutex::new(SaverState::default()),
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// Records `profile` as the latest for `user_id` and (re)starts its timer.
    pub async fn schedule(&self, user_id: Uuid, profile: SkillProfile) {
        let generation = self.inner.stage(user_id, profile).await;
        debug!("Scheduled profile save for user {user_id} (generation {generation})");

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(inner.delay).await;
            if let Err(e) = inner.flush_if_current(user_id, generation).await {
                warn!("Debounced profile save for user {user_id} failed: {e}");
            }
        });
    }

    /// The profile waiting to be written for `user_id`, if any.
    pub async fn pending(&self, user_id: Uuid) -> Option<SkillProfile> {
        let state = self.inner.state.lock().await;
        state.pending.get(&user_id).map(|p| p.profile.clone())
    }

    /// Writes `profile` immediately, superseding any pending save.
    pub async fn save_now(
        &self,
        user_id: Uuid,
        profile: SkillProfile,
    ) -> Result<SkillProfile, AppError> {
        let generation = self.inner.stage(user_id, profile.clone()).await;
        self.inner.commit(user_id, generation, &profile).await
    }

    /// Writes every pending profile now. Called on shutdown.
    pub async fn flush_all(&self) -> usize {
        let staged: Vec<(Uuid, u64, SkillProfile)> = {
            let state = self.inner.state.lock().await;
            state
                .pending
                .iter()
                .map(|(user_id, p)| (*user_id, p.generation, p.profile.clone()))
                .collect()
        };

        let mut written = 0;
        for (user_id, generation, profile) in staged {
            match self.inner.commit_if_latest(user_id, generation, &profile).await {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => warn!("Failed to flush profile for user {user_id}: {e}"),
            }
        }

        if written > 0 {
            info!("Flushed {written} pending profile save(s)");
        }
        written
    }
}

impl Inner {
    async fn stage(&self, user_id: Uuid, profile: SkillProfile) -> u64 {
        let mut state = self.state.lock().await;
        state.next_generation += 1;
        let generation = state.next_generation;
        state.latest.insert(user_id, generation);
        state.pending.insert(
            user_id,
            Pending {
                generation,
                profile,
            },
        );
        generation
    }

    async fn flush_if_current(&self, user_id: Uuid, generation: u64) -> Result<(), AppError> {
        let profile = {
            let state = self.state.lock().await;
            match state.pending.get(&user_id) {
                Some(p) if p.generation == generation => p.profile.clone(),
                _ => return Ok(()),
            }
        };
        self.commit_if_latest(user_id, generation, &profile).await?;
        Ok(())
    }

    /// Unconditional write, used for explicit saves.
    async fn commit(
        &self,
        user_id: Uuid,
        generation: u64,
        profile: &SkillProfile,
    ) -> Result<SkillProfile, AppError> {
        let _guard = self.write_lock.lock().await;
        self.write(user_id, generation, profile).await
    }

    /// Background write. Skipped when a newer profile was staged after
    /// `generation` was snapshotted, so a late timer never overwrites a newer
    /// explicit save. Returns whether the store was written.
    async fn commit_if_latest(
        &self,
        user_id: Uuid,
        generation: u64,
        profile: &SkillProfile,
    ) -> Result<bool, AppError> {
        let _guard = self.write_lock.lock().await;
        let superseded = {
            let state = self.state.lock().await;
            state.latest.get(&user_id).is_some_and(|&latest| latest > generation)
        };
        if superseded {
            debug!("Skipping stale profile save for user {user_id} (generation {generation})");
            return Ok(false);
        }
        self.write(user_id, generation, profile).await?;
        Ok(true)
    }

    /// Caller holds `write_lock`. Drops the pending entry unless a newer one
    /// replaced it while the write was in flight.
    async fn write(
        &self,
        user_id: Uuid,
        generation: u64,
        profile: &SkillProfile,
    ) -> Result<SkillProfile, AppError> {
        let saved = self.store.save(user_id, profile).await?;

        let mut state = self.state.lock().await;
        if state
            .pending
            .get(&user_id)
            .is_some_and(|p| p.generation == generation)
        {
            state.pending.remove(&user_id);
        }
        Ok(saved)
    }
}
