//! The accumulated state of one user's walk through the flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FlowError;
use crate::flow::model::{
    EducationData, EducationLevel, ExperienceData, ExperienceDeclaration, ExperienceEntry,
    JobPreference, PreferenceData, ProfileData, StatusTag,
};
use crate::flow::step::OnboardingStep;

/// One onboarding session: the current step plus every step payload.
///
/// Owned exclusively by the [`crate::flow::FlowController`]; step screens
/// mutate it only through patches against the active step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingSession {
    pub id: Uuid,
    pub current_step: OnboardingStep,
    pub profile: ProfileData,
    pub education: EducationData,
    pub experience: ExperienceData,
    pub preferences: PreferenceData,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for OnboardingSession {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            current_step: OnboardingStep::default(),
            profile: ProfileData::default(),
            education: EducationData::default(),
            experience: ExperienceData::default(),
            preferences: PreferenceData::default(),
            started_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Partial update to the profile step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    /// Toggle one status tag (with `None` exclusivity).
    pub toggle_status: Option<StatusTag>,
}

/// Partial update to the education step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationPatch {
    pub level: Option<EducationLevel>,
    pub degree: Option<String>,
}

/// Partial update to the experience step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperiencePatch {
    pub declaration: Option<ExperienceDeclaration>,
    /// Replaces the entry list wholesale (form screens own the list UI).
    pub entries: Option<Vec<ExperienceEntry>>,
}

/// Partial update to the preferences step. Selection is toggle-only so the
/// maximum can be enforced per call.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencePatch {
    pub toggle: JobPreference,
}

/// A patch addressed to one step. Only the currently active step accepts
/// patches; anything else is a caller bug.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPatch {
    Profile(ProfilePatch),
    Education(EducationPatch),
    Experience(ExperiencePatch),
    Preferences(PreferencePatch),
}

impl StepPatch {
    /// The step this patch addresses.
    pub fn step(&self) -> OnboardingStep {
        match self {
            Self::Profile(_) => OnboardingStep::Profile,
            Self::Education(_) => OnboardingStep::Education,
            Self::Experience(_) => OnboardingStep::Experience,
            Self::Preferences(_) => OnboardingStep::Preferences,
        }
    }
}

impl OnboardingSession {
    /// Merge a patch into its step's payload.
    ///
    /// Rejected with [`FlowError::StepNotActive`] when the patch addresses
    /// any step other than the current one.
    pub fn apply_patch(
        &mut self,
        patch: StepPatch,
        max_preference_selections: usize,
    ) -> Result<(), FlowError> {
        if self.current_step.is_terminal() {
            return Err(FlowError::AlreadyComplete);
        }
        let step = patch.step();
        if step != self.current_step {
            return Err(FlowError::StepNotActive {
                requested: step.to_string(),
                current: self.current_step.to_string(),
            });
        }

        match patch {
            StepPatch::Profile(p) => {
                if let Some(v) = p.full_name {
                    self.profile.full_name = v;
                }
                if let Some(v) = p.email {
                    self.profile.email = v;
                }
                if let Some(v) = p.age {
                    self.profile.age = v;
                }
                if let Some(v) = p.gender {
                    self.profile.gender = v;
                }
                if let Some(tag) = p.toggle_status {
                    self.profile.toggle_status(tag);
                }
            }
            StepPatch::Education(p) => {
                if let Some(v) = p.level {
                    self.education.level = Some(v);
                }
                if let Some(v) = p.degree {
                    self.education.degree = if v.trim().is_empty() { None } else { Some(v) };
                }
            }
            StepPatch::Experience(p) => {
                if let Some(declaration) = p.declaration {
                    self.experience.declaration = declaration;
                    if declaration == ExperienceDeclaration::NoExperience {
                        self.experience.entries.clear();
                    }
                }
                if let Some(entries) = p.entries {
                    // Writing entries implies the user has experience
                    if !entries.is_empty() {
                        self.experience.declaration = ExperienceDeclaration::HasExperience;
                    }
                    self.experience.entries = entries;
                }
            }
            StepPatch::Preferences(p) => {
                self.preferences.toggle(p.toggle, max_preference_selections);
            }
        }
        Ok(())
    }

    /// Mark the session complete.
    pub fn finalize(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// Reset to a fresh session (logout path).
    pub fn reset(&mut self) {
        *self = OnboardingSession::default();
    }
}
