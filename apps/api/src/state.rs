use std::sync::Arc;

use crate::profile::saver::ProfileSaver;
use crate::sources::{OfferSource, ProfileStore, SkillSource};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub skills: Arc<dyn SkillSource>,
    pub offers: Arc<dyn OfferSource>,
    pub profiles: Arc<dyn ProfileStore>,
    /// Debounces writes to `profiles`; consult it before reading the store.
    pub profile_saver: ProfileSaver,
}
