use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reference skill as served to clients. `id` is one representative skill
/// row for the name and only serves as a stable client key; `frequency` only
/// sizes the skill bubble in the UI. Neither feeds the matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Skill {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub frequency: Option<i64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[cfg(test)]
impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Some(format!("id-{}", name.to_lowercase())),
            name,
            frequency: None,
            category: None,
        }
    }
}
