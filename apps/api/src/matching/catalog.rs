use crate::matching::filter::contains_ignore_case;
use crate::models::skill::Skill;

/// Keeps skills whose name contains `term`, ignoring case. A blank term keeps
/// everything. Input order is preserved.
pub fn search_skills(skills: Vec<Skill>, term: &str) -> Vec<Skill> {
    let term = term.trim();
    if term.is_empty() {
        return skills;
    }
    skills
        .into_iter()
        .filter(|skill| contains_ignore_case(&skill.name, term))
        .collect()
}
