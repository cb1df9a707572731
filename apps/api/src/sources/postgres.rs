use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::skill_set::SkillProfile;
use crate::models::offer::{JobOffer, OfferRow};
use crate::models::skill::Skill;
use crate::sources::{OfferSource, ProfileStore, SkillSource};

const SKILL_TYPE_HAS: &str = "HAS";
const SKILL_TYPE_AVOIDS: &str = "AVOIDS";

/// All three collaborators backed by the scraper's PostgreSQL schema
/// (`offers`, `skills`, `offer_skills`, `user_skills`).
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SkillSource for PgStore {
    async fn list_skills(&self, selected: &[String]) -> Result<Vec<Skill>, AppError> {
        if selected.is_empty() {
            return Ok(sqlx::query_as::<_, Skill>(
                r#"
                SELECT
                    MAX(s.uuid::text) AS id,
                    COALESCE(s.canonical_skill_name, s.original_skill_name) AS name,
                    MAX(s.category) AS category,
                    COUNT(os.job_url)::bigint AS frequency
                FROM skills s
                LEFT JOIN offer_skills os ON s.uuid = os.skill_id
                WHERE COALESCE(s.canonical_skill_name, s.original_skill_name) IS NOT NULL
                GROUP BY COALESCE(s.canonical_skill_name, s.original_skill_name)
                ORDER BY frequency DESC, name ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await?);
        }

        // Frequency = Σ over offers sharing ≥1 selected skill of how many
        // distinct selected skills that offer requires.
        Ok(sqlx::query_as::<_, Skill>(
            r#"
            WITH user_offers AS (
                SELECT os.job_url,
                       COUNT(DISTINCT COALESCE(s.canonical_skill_name, s.original_skill_name)) AS match_score
                FROM offer_skills os
                JOIN skills s ON os.skill_id = s.uuid
                WHERE COALESCE(s.canonical_skill_name, s.original_skill_name) = ANY($1::text[])
                GROUP BY os.job_url
            ),
            skill_freq AS (
                SELECT os.skill_id, SUM(uo.match_score) AS freq
                FROM offer_skills os
                JOIN user_offers uo ON os.job_url = uo.job_url
                GROUP BY os.skill_id
            )
            SELECT
                MAX(s.uuid::text) AS id,
                COALESCE(s.canonical_skill_name, s.original_skill_name) AS name,
                MAX(s.category) AS category,
                COALESCE(SUM(sf.freq), 0)::bigint AS frequency
            FROM skills s
            LEFT JOIN skill_freq sf ON s.uuid = sf.skill_id
            WHERE COALESCE(s.canonical_skill_name, s.original_skill_name) IS NOT NULL
            GROUP BY COALESCE(s.canonical_skill_name, s.original_skill_name)
            ORDER BY frequency DESC, name ASC
            "#,
        )
        .bind(selected.to_vec())
        .fetch_all(&self.pool)
        .await?)
    }

    async fn count_skills(&self) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM skills")
            .fetch_one(&self.pool)
            .await?)
    }
}

#[async_trait]
impl OfferSource for PgStore {
    async fn list_offers(&self) -> Result<Vec<JobOffer>, AppError> {
        let rows = sqlx::query_as::<_, OfferRow>(
            r#"
            SELECT
                o.job_url, o.job_title, o.company,
                o.location, o.operating_mode, o.employment_type,
                o.experience, o.work_schedule,
                o.salary_any, o.salary_b2b, o.salary_permanent,
                o.salary_mandate, o.salary_internship, o.salary_specific_task,
                array_agg(COALESCE(s.canonical_skill_name, s.original_skill_name)) AS skills
            FROM offers o
            LEFT JOIN offer_skills os ON o.job_url = os.job_url
            LEFT JOIN skills s ON os.skill_id = s.uuid
            GROUP BY o.job_url, o.job_title, o.company,
                     o.location, o.operating_mode, o.employment_type,
                     o.experience, o.work_schedule,
                     o.salary_any, o.salary_b2b, o.salary_permanent,
                     o.salary_mandate, o.salary_internship, o.salary_specific_task
            ORDER BY o.job_url
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} offers", rows.len());
        Ok(rows.into_iter().map(JobOffer::from).collect())
    }

    async fn count_offers(&self) -> Result<i64, AppError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM offers")
            .fetch_one(&self.pool)
            .await?)
    }
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn load(&self, user_id: Uuid) -> Result<SkillProfile, AppError> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT COALESCE(s.canonical_skill_name, s.original_skill_name) AS name, us.skill_type
            FROM user_skills us
            JOIN skills s ON us.skill_id = s.uuid
            WHERE us.user_id = $1
              AND COALESCE(s.canonical_skill_name, s.original_skill_name) IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut selected = Vec::new();
        let mut blocked = Vec::new();
        for (name, skill_type) in rows {
            match skill_type.as_str() {
                SKILL_TYPE_HAS => selected.push(name),
                SKILL_TYPE_AVOIDS => blocked.push(name),
                _ => {}
            }
        }

        Ok(SkillProfile::new(selected, blocked))
    }

    /// Delete-then-insert inside one transaction. Names are resolved to skill
    /// ids by canonical or original spelling; unknown names are dropped, and a
    /// skill id already stored as HAS is never also stored as AVOIDS.
    async fn save(&self, user_id: Uuid, profile: &SkillProfile) -> Result<SkillProfile, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM user_skills WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if profile.selected().is_empty() && profile.blocked().is_empty() {
            tx.commit().await?;
            info!("Cleared skill profile for user {user_id}");
            return Ok(SkillProfile::default());
        }

        let names: Vec<String> = profile
            .selected()
            .iter()
            .chain(profile.blocked().iter())
            .map(str::to_string)
            .collect();

        let records: Vec<(Uuid, Option<String>, Option<String>)> = sqlx::query_as(
            r#"
            SELECT uuid, canonical_skill_name, original_skill_name
            FROM skills
            WHERE canonical_skill_name = ANY($1) OR original_skill_name = ANY($1)
            "#,
        )
        .bind(&names)
        .fetch_all(&mut *tx)
        .await?;

        let mut ids_by_name: HashMap<&str, Vec<Uuid>> = HashMap::new();
        for (id, canonical, original) in &records {
            for name in [canonical, original].into_iter().flatten() {
                if names.contains(name) {
                    ids_by_name.entry(name.as_str()).or_default().push(*id);
                }
            }
        }

        let mut added: HashSet<Uuid> = HashSet::new();
        let groups = [
            (SKILL_TYPE_HAS, profile.selected()),
            (SKILL_TYPE_AVOIDS, profile.blocked()),
        ];
        for (skill_type, set) in groups {
            for name in set.iter() {
                let ids = ids_by_name.get(name).map(Vec::as_slice).unwrap_or_default();
                for id in ids {
                    if !added.insert(*id) {
                        continue;
                    }
                    sqlx::query(
                        r#"
                        INSERT INTO user_skills (user_id, skill_id, skill_type)
                        VALUES ($1, $2, $3)
                        ON CONFLICT (user_id, skill_id, skill_type) DO NOTHING
                        "#,
                    )
                    .bind(user_id)
                    .bind(id)
                    .bind(skill_type)
                    .execute(&mut *tx)
                    .await?;
                }
            }
        }

        tx.commit().await?;
        info!(
            "Saved skill profile for user {user_id}: {} selected, {} blocked",
            profile.selected().len(),
            profile.blocked().len()
        );

        self.load(user_id).await
    }
}
