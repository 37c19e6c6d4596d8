//! Per-step validators — pure predicates over step payloads.
//!
//! Each validator is side-effect free and cheap enough to re-run on every
//! edit. The controller calls them when deciding whether `advance` may
//! move forward; step UIs use the same signal to disable their "next"
//! control.

use crate::config::FlowConfig;
use crate::flow::model::{
    EducationData, ExperienceData, ExperienceDeclaration, ExperienceEntry, PreferenceData,
    ProfileData,
};
use crate::flow::session::OnboardingSession;
use crate::flow::step::OnboardingStep;

/// Message keys surfaced when a step blocks advancement. Opaque i18n keys;
/// the host looks up display text.
pub mod message_keys {
    pub const PROFILE_INCOMPLETE: &str = "onboarding.profile.missing_information";
    pub const EDUCATION_INCOMPLETE: &str = "onboarding.education.select_level";
    pub const EXPERIENCE_INCOMPLETE: &str = "onboarding.experience.missing_information";
    pub const PREFERENCES_INCOMPLETE: &str = "onboarding.preferences.select_at_least_one";
}

/// Profile step: every configured required field must be non-blank.
pub fn profile_complete(data: &ProfileData, config: &FlowConfig) -> bool {
    config
        .required_profile_fields
        .iter()
        .all(|field| !data.field(*field).trim().is_empty())
}

/// Education step: a level selection is all that is required. The degree
/// field, where collected, never blocks advancement.
pub fn education_complete(data: &EducationData) -> bool {
    data.level.is_some()
}

/// One experience entry: non-blank company and title, parseable start, and
/// (unless current) a parseable end no earlier than the start.
pub fn experience_entry_complete(entry: &ExperienceEntry) -> bool {
    if entry.company.trim().is_empty() || entry.job_title.trim().is_empty() {
        return false;
    }
    let Some(start) = entry.start() else {
        return false;
    };
    if entry.is_current {
        return true;
    }
    match entry.end() {
        Some(end) => end >= start,
        None => false,
    }
}

/// Experience step: declared no-experience passes outright; otherwise a
/// non-empty entry list where every entry is complete. An undeclared step
/// never passes, even with entries present.
pub fn experience_complete(data: &ExperienceData) -> bool {
    match data.declaration {
        ExperienceDeclaration::NoExperience => true,
        ExperienceDeclaration::HasExperience => {
            !data.entries.is_empty() && data.entries.iter().all(experience_entry_complete)
        }
        ExperienceDeclaration::Unset => false,
    }
}

/// Preferences step: at least one selection. The upper bound is enforced
/// at selection time, not here.
pub fn preferences_complete(data: &PreferenceData) -> bool {
    !data.selected.is_empty()
}

/// Run the validator for `step` against the session.
///
/// Returns `None` when the step may advance, or the message key to surface
/// when it may not. `Done` has nothing left to validate.
pub fn check_step(
    step: OnboardingStep,
    session: &OnboardingSession,
    config: &FlowConfig,
) -> Option<&'static str> {
    let (complete, message_key) = match step {
        OnboardingStep::Profile => (
            profile_complete(&session.profile, config),
            message_keys::PROFILE_INCOMPLETE,
        ),
        OnboardingStep::Education => (
            education_complete(&session.education),
            message_keys::EDUCATION_INCOMPLETE,
        ),
        OnboardingStep::Experience => (
            experience_complete(&session.experience),
            message_keys::EXPERIENCE_INCOMPLETE,
        ),
        OnboardingStep::Preferences => (
            preferences_complete(&session.preferences),
            message_keys::PREFERENCES_INCOMPLETE,
        ),
        OnboardingStep::Done => return None,
    };
    (!complete).then_some(message_key)
}
