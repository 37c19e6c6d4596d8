//! Onboarding step state machine — tracks which screen the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the onboarding flow.
///
/// Progresses linearly: Profile → Education → Experience → Preferences →
/// Done. `advance` moves forward one step at a time (gated by validation),
/// `retreat` moves backward; there is no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Profile,
    Education,
    Experience,
    Preferences,
    Done,
}

impl OnboardingStep {
    /// The fixed step order, first to last.
    pub const ORDER: [OnboardingStep; 5] = [
        Self::Profile,
        Self::Education,
        Self::Experience,
        Self::Preferences,
        Self::Done,
    ];

    /// Check if a transition from `self` to `target` is valid.
    ///
    /// Only adjacent moves are allowed: one step forward or one step back.
    /// `Done` is terminal and cannot be left.
    pub fn can_transition_to(&self, target: OnboardingStep) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.next() == Some(target) || self.prev() == Some(target)
    }

    /// Whether this step is terminal (onboarding is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Get the next step in the linear progression, if any.
    pub fn next(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Profile => Some(Education),
            Education => Some(Experience),
            Experience => Some(Preferences),
            Preferences => Some(Done),
            Done => None,
        }
    }

    /// Get the previous step in the linear progression, if any.
    pub fn prev(&self) -> Option<OnboardingStep> {
        use OnboardingStep::*;
        match self {
            Profile => None,
            Education => Some(Profile),
            Experience => Some(Education),
            Preferences => Some(Experience),
            Done => Some(Preferences),
        }
    }

    /// Zero-based position of this step in the fixed order.
    pub fn position(&self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or(Self::ORDER.len() - 1)
    }
}

impl Default for OnboardingStep {
    fn default() -> Self {
        Self::Profile
    }
}

impl std::fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profile => "profile",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Preferences => "preferences",
            Self::Done => "done",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OnboardingStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(Self::Profile),
            "education" => Ok(Self::Education),
            "experience" => Ok(Self::Experience),
            "preferences" => Ok(Self::Preferences),
            "done" => Ok(Self::Done),
            other => Err(format!("unknown onboarding step: {other}")),
        }
    }
}
