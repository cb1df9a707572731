use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::null_as_default;

/// A scraped job listing. Immutable within a single fetch.
///
/// Only `required_skills` participates in scoring; every other attribute is
/// opaque and used by filter predicates or display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobOffer {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub operating_mode: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default, alias = "experience")]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub work_schedule: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required_skills: Vec<String>,
}

/// One row of the offers query: offer columns plus the aggregated skill names.
#[derive(Debug, Clone, FromRow)]
pub struct OfferRow {
    pub job_url: String,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub operating_mode: Option<String>,
    pub employment_type: Option<String>,
    pub experience: Option<String>,
    pub work_schedule: Option<String>,
    pub salary_any: Option<String>,
    pub salary_b2b: Option<String>,
    pub salary_permanent: Option<String>,
    pub salary_mandate: Option<String>,
    pub salary_internship: Option<String>,
    pub salary_specific_task: Option<String>,
    /// `array_agg` over a LEFT JOIN yields `{NULL}` for offers without skills.
    pub skills: Option<Vec<Option<String>>>,
}

impl OfferRow {
    /// Display salary precedence: B2B > permanent > any > mandate > task > internship.
    fn display_salary(&self) -> Option<String> {
        [
            &self.salary_b2b,
            &self.salary_permanent,
            &self.salary_any,
            &self.salary_mandate,
            &self.salary_specific_task,
            &self.salary_internship,
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .cloned()
    }
}

impl From<OfferRow> for JobOffer {
    fn from(row: OfferRow) -> Self {
        let salary = row.display_salary();
        let required_skills = row
            .skills
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();

        JobOffer {
            id: row.job_url,
            title: row.job_title.unwrap_or_default(),
            company: row.company.unwrap_or_default(),
            location: row.location,
            operating_mode: row.operating_mode,
            employment_type: row.employment_type,
            experience_level: row.experience,
            work_schedule: row.work_schedule,
            salary,
            required_skills,
        }
    }
}
