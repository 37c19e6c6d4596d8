//! Breadcrumb projection — a pure view of the current step against the
//! fixed step order.

use serde::Serialize;

use crate::flow::step::OnboardingStep;

/// One breadcrumb slot. Steps after the active one are neither active nor
/// completed; the host renders those disabled, consistent with the no-skip
/// rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreadcrumbItem {
    /// i18n key for the slot label.
    pub label_key: &'static str,
    pub target_step: OnboardingStep,
    pub is_active: bool,
    pub is_completed: bool,
}

fn label_key(step: OnboardingStep) -> &'static str {
    match step {
        OnboardingStep::Profile => "onboarding.steps.profile",
        OnboardingStep::Education => "onboarding.steps.education",
        OnboardingStep::Experience => "onboarding.steps.experience",
        OnboardingStep::Preferences => "onboarding.steps.preferences",
        OnboardingStep::Done => "onboarding.steps.see_jobs",
    }
}

/// Project `current` onto the fixed step order.
pub fn project_breadcrumb(current: OnboardingStep) -> Vec<BreadcrumbItem> {
    let position = current.position();
    OnboardingStep::ORDER
        .iter()
        .enumerate()
        .map(|(i, step)| BreadcrumbItem {
            label_key: label_key(*step),
            target_step: *step,
            is_active: i == position,
            is_completed: i < position,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_has_no_completed_items() {
        let items = project_breadcrumb(OnboardingStep::Profile);
        assert_eq!(items.len(), 5);
        assert!(items[0].is_active);
        assert!(items.iter().all(|i| !i.is_completed));
        assert_eq!(items.iter().filter(|i| i.is_active).count(), 1);
    }

    #[test]
    fn middle_step_splits_completed_and_upcoming() {
        let items = project_breadcrumb(OnboardingStep::Experience);
        assert!(items[0].is_completed && !items[0].is_active);
        assert!(items[1].is_completed && !items[1].is_active);
        assert!(items[2].is_active && !items[2].is_completed);
        assert!(!items[3].is_active && !items[3].is_completed);
        assert!(!items[4].is_active && !items[4].is_completed);
    }

    #[test]
    fn terminal_step_completes_everything_before_it() {
        let items = project_breadcrumb(OnboardingStep::Done);
        assert!(items[4].is_active);
        assert!(items[..4].iter().all(|i| i.is_completed));
    }

    #[test]
    fn targets_follow_fixed_order() {
        let items = project_breadcrumb(OnboardingStep::Education);
        let targets: Vec<_> = items.iter().map(|i| i.target_step).collect();
        assert_eq!(targets, OnboardingStep::ORDER.to_vec());
    }
}
