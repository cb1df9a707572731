//! User skill profile: the `selected` / `blocked` pair and the per-skill toggle
//! state machine.
//!
//! Every mutation goes through [`SkillProfile`], which keeps the two sets
//! disjoint. Skill names are compared exactly (no case folding, no trimming).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::null_as_default;

/// A set of skill names. Order is irrelevant; iteration is sorted so
/// serialized profiles are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn insert(&mut self, skill: &str) -> bool {
        self.0.insert(skill.to_string())
    }

    fn remove(&mut self, skill: &str) -> bool {
        self.0.remove(skill)
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Where a single skill currently sits in the user's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillState {
    Neutral,
    Selected,
    Blocked,
}

/// The two user gestures on a skill. Which physical input maps to which is a
/// presentation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    /// Toggles `selected`; pulls the skill out of `blocked` if needed.
    Primary,
    /// Toggles `blocked`; pulls the skill out of `selected` if needed.
    Secondary,
}

impl SkillState {
    /// Transition table for one skill.
    pub fn next(self, action: ToggleAction) -> SkillState {
        match (self, action) {
            (SkillState::Selected, ToggleAction::Primary) => SkillState::Neutral,
            (_, ToggleAction::Primary) => SkillState::Selected,
            (SkillState::Blocked, ToggleAction::Secondary) => SkillState::Neutral,
            (_, ToggleAction::Secondary) => SkillState::Blocked,
        }
    }
}

/// Wire shape of a profile: `{ "skills": [...], "antiSkills": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub anti_skills: Vec<String>,
}

/// A user's `selected` and `blocked` skills.
///
/// Invariant: `selected ∩ blocked = ∅`. Fields are private so the only way to
/// change either set is through methods that uphold it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProfilePayload", into = "ProfilePayload")]
pub struct SkillProfile {
    selected: SkillSet,
    blocked: SkillSet,
}

impl SkillProfile {
    /// Builds a profile from raw lists. A name present in both lists stays
    /// selected and is dropped from `blocked`.
    pub fn new<S, B>(selected: S, blocked: B) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let selected: SkillSet = selected.into_iter().collect();
        let blocked = blocked
            .into_iter()
            .map(Into::into)
            .filter(|skill: &String| !selected.contains(skill))
            .collect();
        Self { selected, blocked }
    }

    pub fn selected(&self) -> &SkillSet {
        &self.selected
    }

    pub fn blocked(&self) -> &SkillSet {
        &self.blocked
    }

    pub fn state_of(&self, skill: &str) -> SkillState {
        if self.selected.contains(skill) {
            SkillState::Selected
        } else if self.blocked.contains(skill) {
            SkillState::Blocked
        } else {
            SkillState::Neutral
        }
    }

    /// Applies one user gesture to `skill` and returns its new state.
    pub fn toggle(&mut self, skill: &str, action: ToggleAction) -> SkillState {
        let next = self.state_of(skill).next(action);
        self.set_state(skill, next);
        next
    }

    /// Forces `skill` into `state`, leaving whichever set it was in before.
    pub fn set_state(&mut self, skill: &str, state: SkillState) {
        match state {
            SkillState::Neutral => {
                self.selected.remove(skill);
                self.blocked.remove(skill);
            }
            SkillState::Selected => {
                self.blocked.remove(skill);
                self.selected.insert(skill);
            }
            SkillState::Blocked => {
                self.selected.remove(skill);
                self.blocked.insert(skill);
            }
        }
    }
}

impl From<ProfilePayload> for SkillProfile {
    fn from(payload: ProfilePayload) -> Self {
        SkillProfile::new(payload.skills, payload.anti_skills)
    }
}

impl From<SkillProfile> for ProfilePayload {
    fn from(profile: SkillProfile) -> Self {
        ProfilePayload {
            skills: profile.selected.0.into_iter().collect(),
            anti_skills: profile.blocked.0.into_iter().collect(),
        }
    }
}
