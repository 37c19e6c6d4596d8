//! FlowController — owns the session, sequences steps, and guards
//! transitions.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::FlowConfig;
use crate::error::FlowError;
use crate::flow::breadcrumb::{BreadcrumbItem, project_breadcrumb};
use crate::flow::model::ExperienceDuration;
use crate::flow::session::{OnboardingSession, StepPatch};
use crate::flow::step::OnboardingStep;
use crate::flow::validate;
use crate::guard::{GuardOutcome, NavigationGuard};
use crate::host::{Navigator, Route, SubmissionSink};

/// Outcome of an `advance` or `retreat` request.
///
/// All of these are routine control flow, reported as values: a blocked
/// advance surfaces its message key inline, and a suppressed transition is
/// a benign double-tap the UI ignores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Transition {
    /// The session moved to `step`.
    Moved { step: OnboardingStep },
    /// Validation refused forward progress; surface `message_key` inline.
    Blocked { message_key: &'static str },
    /// A transition was already in flight; the request was dropped.
    Suppressed,
    /// Nothing to do (retreat at the first step, advance past terminal).
    Unchanged,
}

/// Snapshot of the flow for the status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct FlowStatus {
    pub session_id: Uuid,
    pub current_step: OnboardingStep,
    pub complete: bool,
    pub can_advance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<&'static str>,
    pub total_experience: ExperienceDuration,
    pub breadcrumb: Vec<BreadcrumbItem>,
}

/// Sequences the onboarding steps over one exclusively-owned session.
///
/// `current_step` is only ever mutated inside a guarded transition, so
/// step changes are strictly serialized even under rapid repeated input.
pub struct FlowController {
    config: FlowConfig,
    navigator: Arc<dyn Navigator>,
    sink: Arc<dyn SubmissionSink>,
    guard: NavigationGuard,
    session: Arc<RwLock<OnboardingSession>>,
}

impl FlowController {
    pub fn new(
        config: FlowConfig,
        navigator: Arc<dyn Navigator>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        Self {
            config,
            navigator,
            sink,
            guard: NavigationGuard::new(),
            session: Arc::new(RwLock::new(OnboardingSession::default())),
        }
    }

    /// Validate the current step and, if it passes, move one step forward
    /// through a guarded transition. Reaching `Done` finalizes the session
    /// and hands the full bundle to the submission sink.
    pub async fn advance(&self) -> Transition {
        // A request landing inside the cooldown window is a double-tap;
        // drop it before validation so no spurious message surfaces.
        if self.guard.is_navigating() {
            warn!("Navigation already in progress, ignoring duplicate call");
            return Transition::Suppressed;
        }

        let mut session = self.session.write().await;
        let current = session.current_step;
        let Some(next) = current.next() else {
            debug!("Advance requested past terminal step");
            return Transition::Unchanged;
        };

        if let Some(message_key) = validate::check_step(current, &session, &self.config) {
            debug!(step = %current, message_key, "Advance blocked by validation");
            return Transition::Blocked { message_key };
        }

        let outcome = self.guard.run(self.config.guard_cooldown, || {
            session.current_step = next;
            self.navigator.navigate_to(Route::for_step(next), None)
        });
        if outcome == GuardOutcome::Suppressed {
            return Transition::Suppressed;
        }

        info!(from = %current, to = %next, "Advanced onboarding step");
        if next.is_terminal() {
            session.finalize();
            self.sink.submit(&session).await;
        }
        Transition::Moved { step: next }
    }

    /// Move one step backward through a guarded transition. Never
    /// validates; a no-op at the first step and after completion.
    pub async fn retreat(&self) -> Transition {
        if self.guard.is_navigating() {
            warn!("Navigation already in progress, ignoring duplicate call");
            return Transition::Suppressed;
        }

        let mut session = self.session.write().await;
        let current = session.current_step;
        if current.is_terminal() {
            return Transition::Unchanged;
        }
        let Some(prev) = current.prev() else {
            debug!("Retreat requested at first step");
            return Transition::Unchanged;
        };

        let outcome = self.guard.run(self.config.guard_cooldown, || {
            session.current_step = prev;
            self.navigator.navigate_to(Route::for_step(prev), None)
        });
        if outcome == GuardOutcome::Suppressed {
            return Transition::Suppressed;
        }

        info!(from = %current, to = %prev, "Retreated onboarding step");
        Transition::Moved { step: prev }
    }

    /// Merge a patch into the active step's data.
    pub async fn update_step_data(&self, patch: StepPatch) -> Result<(), FlowError> {
        let mut session = self.session.write().await;
        debug!(step = %patch.step(), "Applying step patch");
        session.apply_patch(patch, self.config.max_preference_selections)
    }

    /// Current flow status, including the breadcrumb projection.
    pub async fn status(&self) -> FlowStatus {
        let session = self.session.read().await;
        let current = session.current_step;
        let blocked_by = validate::check_step(current, &session, &self.config);
        FlowStatus {
            session_id: session.id,
            current_step: current,
            complete: current.is_terminal(),
            can_advance: !current.is_terminal() && blocked_by.is_none(),
            blocked_by,
            total_experience: session.experience.total_duration(),
            breadcrumb: project_breadcrumb(current),
        }
    }

    /// Read a snapshot of the session.
    pub async fn session(&self) -> OnboardingSession {
        self.session.read().await.clone()
    }

    /// Discard the session and start over (logout path). Also force-clears
    /// the guard so a stale cooldown cannot swallow the first transition
    /// of the new session.
    pub async fn reset(&self) {
        let mut session = self.session.write().await;
        info!(session_id = %session.id, "Resetting onboarding session");
        session.reset();
        self.guard.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavigationError;
    use crate::flow::model::{
        EducationLevel, ExperienceDeclaration, ExperienceEntry, JobPreference,
    };
    use crate::flow::session::{
        EducationPatch, ExperiencePatch, PreferencePatch, ProfilePatch,
    };
    use crate::flow::validate::message_keys;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Records every navigation for assertions.
    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to(
            &self,
            route: Route,
            _params: Option<serde_json::Value>,
        ) -> Result<(), NavigationError> {
            self.routes.lock().unwrap().push(route);
            Ok(())
        }

        fn go_back(&self) -> Result<(), NavigationError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        submitted: Mutex<Option<OnboardingSession>>,
    }

    #[async_trait]
    impl SubmissionSink for RecordingSink {
        async fn submit(&self, session: &OnboardingSession) {
            *self.submitted.lock().unwrap() = Some(session.clone());
        }
    }

    fn controller() -> (Arc<FlowController>, Arc<RecordingNavigator>, Arc<RecordingSink>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let sink = Arc::new(RecordingSink::default());
        let controller = Arc::new(FlowController::new(
            FlowConfig::default(),
            Arc::clone(&navigator) as Arc<dyn Navigator>,
            Arc::clone(&sink) as Arc<dyn SubmissionSink>,
        ));
        (controller, navigator, sink)
    }

    async fn past_cooldown() {
        tokio::time::sleep(Duration::from_millis(801)).await;
    }

    async fn fill_profile(c: &FlowController) {
        c.update_step_data(StepPatch::Profile(ProfilePatch {
            full_name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            ..Default::default()
        }))
        .await
        .unwrap();
    }

    async fn fill_education(c: &FlowController) {
        c.update_step_data(StepPatch::Education(EducationPatch {
            level: Some(EducationLevel::Graduation),
            degree: Some("B.Sc".to_string()),
        }))
        .await
        .unwrap();
    }

    async fn fill_experience(c: &FlowController) {
        c.update_step_data(StepPatch::Experience(ExperiencePatch {
            declaration: None,
            entries: Some(vec![ExperienceEntry {
                company: "Acme".to_string(),
                job_title: "Clerk".to_string(),
                start_month: "3".to_string(),
                start_year: "2020".to_string(),
                is_current: true,
                ..Default::default()
            }]),
        }))
        .await
        .unwrap();
    }

    async fn fill_preferences(c: &FlowController) {
        c.update_step_data(StepPatch::Preferences(PreferencePatch {
            toggle: JobPreference {
                id: "cashier".to_string(),
                label_key: "jobs.preferences.cashier".to_string(),
            },
        }))
        .await
        .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn advance_blocked_until_step_is_valid() {
        let (c, nav, _) = controller();
        assert_eq!(
            c.advance().await,
            Transition::Blocked {
                message_key: message_keys::PROFILE_INCOMPLETE
            }
        );
        assert!(nav.routes.lock().unwrap().is_empty());

        fill_profile(&c).await;
        assert_eq!(
            c.advance().await,
            Transition::Moved {
                step: OnboardingStep::Education
            }
        );
        assert_eq!(
            *nav.routes.lock().unwrap(),
            vec![Route::for_step(OnboardingStep::Education)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn double_tap_is_suppressed_not_blocked() {
        let (c, nav, _) = controller();
        fill_profile(&c).await;

        assert!(matches!(c.advance().await, Transition::Moved { .. }));
        // 10ms later: inside the cooldown, no validation message surfaces
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(c.advance().await, Transition::Suppressed);
        assert_eq!(nav.routes.lock().unwrap().len(), 1);

        // After the cooldown the education validator speaks for itself
        past_cooldown().await;
        assert_eq!(
            c.advance().await,
            Transition::Blocked {
                message_key: message_keys::EDUCATION_INCOMPLETE
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_at_first_step_is_a_no_op() {
        let (c, nav, _) = controller();
        for _ in 0..3 {
            assert_eq!(c.retreat().await, Transition::Unchanged);
        }
        assert_eq!(c.status().await.current_step, OnboardingStep::Profile);
        assert!(nav.routes.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn retreat_never_validates() {
        let (c, _, _) = controller();
        fill_profile(&c).await;
        c.advance().await;
        past_cooldown().await;

        // Education is empty, retreat is still permitted
        assert_eq!(
            c.retreat().await,
            Transition::Moved {
                step: OnboardingStep::Profile
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn full_walk_hands_off_at_terminal() {
        let (c, nav, sink) = controller();

        fill_profile(&c).await;
        assert!(matches!(c.advance().await, Transition::Moved { .. }));
        past_cooldown().await;

        fill_education(&c).await;
        assert!(matches!(c.advance().await, Transition::Moved { .. }));
        past_cooldown().await;

        fill_experience(&c).await;
        assert!(matches!(c.advance().await, Transition::Moved { .. }));
        past_cooldown().await;

        fill_preferences(&c).await;
        assert_eq!(
            c.advance().await,
            Transition::Moved {
                step: OnboardingStep::Done
            }
        );

        let status = c.status().await;
        assert!(status.complete);
        assert!(!status.can_advance);

        // The full bundle reached the sink at the terminal transition
        let submitted = sink.submitted.lock().unwrap().clone().unwrap();
        assert_eq!(submitted.profile.full_name, "Asha Rao");
        assert_eq!(submitted.education.level, Some(EducationLevel::Graduation));
        assert_eq!(submitted.experience.entries.len(), 1);
        assert_eq!(
            submitted.experience.declaration,
            ExperienceDeclaration::HasExperience
        );
        assert_eq!(submitted.preferences.selected.len(), 1);
        assert!(submitted.completed_at.is_some());

        assert_eq!(
            nav.routes.lock().unwrap().last(),
            Some(&Route::for_step(OnboardingStep::Done))
        );

        // Terminal: no further movement in either direction
        past_cooldown().await;
        assert_eq!(c.advance().await, Transition::Unchanged);
        assert_eq!(c.retreat().await, Transition::Unchanged);
    }

    #[tokio::test(start_paused = true)]
    async fn update_rejected_for_inactive_step() {
        let (c, _, _) = controller();
        let err = c
            .update_step_data(StepPatch::Education(EducationPatch {
                level: Some(EducationLevel::Tenth),
                degree: None,
            }))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::StepNotActive { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn reset_starts_a_fresh_session() {
        let (c, _, _) = controller();
        let first_id = c.status().await.session_id;

        fill_profile(&c).await;
        c.advance().await;
        c.reset().await;

        let status = c.status().await;
        assert_eq!(status.current_step, OnboardingStep::Profile);
        assert_ne!(status.session_id, first_id);

        // Guard was force-cleared: the new session can transition at once
        fill_profile(&c).await;
        assert!(matches!(c.advance().await, Transition::Moved { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn status_reports_breadcrumb_and_gating() {
        let (c, _, _) = controller();
        let status = c.status().await;
        assert_eq!(status.current_step, OnboardingStep::Profile);
        assert!(!status.can_advance);
        assert_eq!(status.blocked_by, Some(message_keys::PROFILE_INCOMPLETE));
        assert_eq!(status.breadcrumb.len(), 5);
        assert!(status.breadcrumb[0].is_active);

        fill_profile(&c).await;
        let status = c.status().await;
        assert!(status.can_advance);
        assert!(status.blocked_by.is_none());
    }
}
