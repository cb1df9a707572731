//! Display filters applied after the dealbreaker veto.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::offer::JobOffer;

/// Independently optional predicates, combined with AND. An absent or empty
/// field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive, unanchored substring of the title.
    pub title_contains: Option<String>,
    pub location: Option<String>,
    pub operating_mode: Option<String>,
    pub employment_type: Option<String>,
    pub experience_level: Option<String>,
    /// Inclusive lower bound on score. Kept wide so out-of-range values reach
    /// [`FilterSpec::validate`] instead of failing deserialization.
    #[serde(deserialize_with = "optional_score")]
    pub min_score: Option<i64>,
}

impl FilterSpec {
    pub fn validate(&self) -> Result<(), String> {
        match self.min_score {
            Some(min) if !(0..=100).contains(&min) => {
                Err(format!("minScore must be between 0 and 100, got {min}"))
            }
            _ => Ok(()),
        }
    }

    /// True when `offer` with `score` passes every active predicate.
    pub fn admits(&self, offer: &JobOffer, score: u8) -> bool {
        i64::from(score) >= self.min_score.unwrap_or(0)
            && title_matches(self.title_contains.as_deref(), &offer.title)
            && attribute_matches(self.location.as_deref(), offer.location.as_deref())
            && attribute_matches(self.operating_mode.as_deref(), offer.operating_mode.as_deref())
            && attribute_matches(self.employment_type.as_deref(), offer.employment_type.as_deref())
            && attribute_matches(
                self.experience_level.as_deref(),
                offer.experience_level.as_deref(),
            )
    }
}

/// Accepts a JSON number, a numeric string (query strings carry everything as
/// text), or `null`/`""` for "no constraint".
fn optional_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScoreVisitor;

    impl<'de> Visitor<'de> for ScoreVisitor {
        type Value = Option<i64>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an integer score, a numeric string, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(i64::try_from(v).unwrap_or(i64::MAX)))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let v = v.trim();
            if v.is_empty() {
                return Ok(None);
            }
            v.parse::<i64>()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    deserializer.deserialize_option(ScoreVisitor)
}

fn active(constraint: Option<&str>) -> Option<&str> {
    constraint.filter(|c| !c.is_empty())
}

fn title_matches(needle: Option<&str>, title: &str) -> bool {
    match active(needle) {
        None => true,
        Some(needle) => contains_ignore_case(title, needle),
    }
}

fn attribute_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match active(wanted) {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

/// Unanchored, case-insensitive substring test. Shared with skill search so
/// both use the same folding.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Distinct values available for each exact-match filter, for populating
/// dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub operating_modes: Vec<String>,
    pub employment_types: Vec<String>,
    pub experience_levels: Vec<String>,
}

impl FilterOptions {
    pub fn from_offers(offers: &[JobOffer]) -> Self {
        FilterOptions {
            locations: distinct(offers.iter().map(|o| o.location.as_deref())),
            operating_modes: distinct(offers.iter().map(|o| o.operating_mode.as_deref())),
            employment_types: distinct(offers.iter().map(|o| o.employment_type.as_deref())),
            experience_levels: distinct(offers.iter().map(|o| o.experience_level.as_deref())),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer() -> JobOffer {
        JobOffer {
            id: "o1".to_string(),
            title: "Senior Rust Developer".to_string(),
            company: "Acme".to_string(),
            location: Some("Kraków".to_string()),
            operating_mode: Some("Remote".to_string()),
            employment_type: Some("B2B".to_string()),
            experience_level: Some("Senior".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_spec_admits_everything() {
        assert!(FilterSpec::default().admits(&offer(), 0));
        assert!(FilterSpec::default().admits(&JobOffer::default(), 0));
    }

    #[test]
    fn test_title_is_case_insensitive_substring() {
        let spec = FilterSpec {
            title_contains: Some("rust dev".to_string()),
            ..Default::default()
        };
        assert!(spec.admits(&offer(), 10));

        let spec = FilterSpec {
            title_contains: Some("Python".to_string()),
            ..Default::default()
        };
        assert!(!spec.admits(&offer(), 10));
    }

    #[test]
    fn test_empty_strings_place_no_constraint() {
        let spec = FilterSpec {
            title_contains: Some(String::new()),
            location: Some(String::new()),
            operating_mode: Some(String::new()),
            ..Default::default()
        };
        assert!(spec.admits(&offer(), 0));
    }

    #[test]
    fn test_attributes_are_exact_match() {
        let spec = FilterSpec {
            operating_mode: Some("remote".to_string()),
            ..Default::default()
        };
        assert!(!spec.admits(&offer(), 50));

        let spec = FilterSpec {
            location: Some("Kraków".to_string()),
            ..Default::default()
        };
        assert!(spec.admits(&offer(), 50));
    }

    #[test]
    fn test_missing_attribute_fails_active_constraint() {
        let spec = FilterSpec {
            employment_type: Some("B2B".to_string()),
            ..Default::default()
        };
        assert!(!spec.admits(&JobOffer::default(), 100));
    }

    #[test]
    fn test_min_score_is_inclusive() {
        let spec = FilterSpec {
            min_score: Some(50),
            ..Default::default()
        };
        assert!(spec.admits(&offer(), 50));
        assert!(!spec.admits(&offer(), 49));
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let spec = FilterSpec {
            title_contains: Some("rust".to_string()),
            location: Some("Kraków".to_string()),
            operating_mode: Some("Remote".to_string()),
            employment_type: Some("B2B".to_string()),
            experience_level: Some("Senior".to_string()),
            min_score: Some(60),
        };
        assert!(spec.admits(&offer(), 60));

        let mut junior = offer();
        junior.experience_level = Some("Junior".to_string());
        assert!(!spec.admits(&junior, 60));
        assert!(!spec.admits(&offer(), 59));
    }

    #[test]
    fn test_validate_rejects_min_score_over_100() {
        let spec = FilterSpec {
            min_score: Some(101),
            ..Default::default()
        };
        assert!(spec.validate().is_err());
        assert!(FilterSpec::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_min_score() {
        let spec = FilterSpec {
            min_score: Some(-1),
            ..Default::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_min_score_accepts_numbers_strings_and_blanks() {
        let parse = |value: serde_json::Value| {
            serde_json::from_value::<FilterSpec>(serde_json::json!({ "minScore": value }))
                .unwrap()
                .min_score
        };
        assert_eq!(parse(serde_json::json!(300)), Some(300));
        assert_eq!(parse(serde_json::json!(-5)), Some(-5));
        assert_eq!(parse(serde_json::json!("60")), Some(60));
        assert_eq!(parse(serde_json::json!("")), None);
        assert_eq!(parse(serde_json::Value::Null), None);
        assert_eq!(FilterSpec::default().min_score, None);
    }

    #[test]
    fn test_min_score_rejects_non_numeric_text() {
        let parsed = serde_json::from_value::<FilterSpec>(serde_json::json!({ "minScore": "high" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_filter_options_are_distinct_sorted_non_empty() {
        let mut second = offer();
        second.location = Some("Gdańsk".to_string());
        second.operating_mode = Some(" ".to_string());
        let third = JobOffer::default();

        let options = FilterOptions::from_offers(&[offer(), second, third, offer()]);
        assert_eq!(options.locations, vec!["Gdańsk", "Kraków"]);
        assert_eq!(options.operating_modes, vec!["Remote"]);
        assert_eq!(options.employment_types, vec!["B2B"]);
        assert_eq!(options.experience_levels, vec!["Senior"]);
    }
}
