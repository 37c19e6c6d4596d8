//! Guarded sequential onboarding flow.
//!
//! A user walks a fixed order of profile-completion steps. Each step's
//! data is validated by a pure predicate before `advance` may move
//! forward; every transition goes through the single-flight navigation
//! guard; reaching the terminal step hands the accumulated session to the
//! host's submission routine.

pub mod breadcrumb;
pub mod controller;
pub mod model;
pub mod routes;
pub mod session;
pub mod step;
pub mod validate;

pub use breadcrumb::{BreadcrumbItem, project_breadcrumb};
pub use controller::{FlowController, FlowStatus, Transition};
pub use routes::{FlowRouteState, flow_routes};
pub use session::{OnboardingSession, StepPatch};
pub use step::OnboardingStep;
