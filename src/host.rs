//! Host application boundary — navigation and submission capabilities.
//!
//! The flow does not implement routing or persistence. The host supplies a
//! router behind [`Navigator`] and a submission routine behind
//! [`SubmissionSink`]; the service ships tracing-backed defaults so it can
//! run standalone.

use async_trait::async_trait;
use serde_json::Value;
use tracing::info;

use crate::error::NavigationError;
use crate::flow::session::OnboardingSession;
use crate::flow::step::OnboardingStep;

/// A navigable route in the host application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route(pub &'static str);

impl Route {
    /// The screen route for an onboarding step.
    pub fn for_step(step: OnboardingStep) -> Route {
        match step {
            OnboardingStep::Profile => Route("/user-details/profile"),
            OnboardingStep::Education => Route("/user-details/education"),
            OnboardingStep::Experience => Route("/user-details/experience"),
            OnboardingStep::Preferences => Route("/user-details/preferences"),
            OnboardingStep::Done => Route("/jobs"),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host router capability. Navigations are fire-and-forget: failures are
/// logged by the guard, never retried.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: Route, params: Option<Value>) -> Result<(), NavigationError>;
    fn go_back(&self) -> Result<(), NavigationError>;
}

/// Receives the full session bundle at the terminal transition.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, session: &OnboardingSession);
}

/// Default navigator: logs transitions. Stands in for the host router when
/// the service runs standalone.
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate_to(&self, route: Route, params: Option<Value>) -> Result<(), NavigationError> {
        match params {
            Some(params) => info!(%route, %params, "navigate"),
            None => info!(%route, "navigate"),
        }
        Ok(())
    }

    fn go_back(&self) -> Result<(), NavigationError> {
        info!("navigate back");
        Ok(())
    }
}

/// Default sink: logs the completed session.
pub struct TracingSink;

#[async_trait]
impl SubmissionSink for TracingSink {
    async fn submit(&self, session: &OnboardingSession) {
        info!(
            session_id = %session.id,
            experience_entries = session.experience.entries.len(),
            preferences = session.preferences.selected.len(),
            "Onboarding complete, handing session to submission"
        );
    }
}
