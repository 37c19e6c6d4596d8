//! Error types for the onboarding flow service.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Flow contract violations.
///
/// Validation failures and guard suppressions are *not* errors — they are
/// routine outcomes reported through [`crate::flow::Transition`]. These
/// variants indicate caller bugs.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Step {requested} is not active (current step: {current})")]
    StepNotActive { requested: String, current: String },

    #[error("Onboarding already complete")]
    AlreadyComplete,
}

/// Errors from the host application's navigation capability.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Route {route} rejected by host router: {reason}")]
    Rejected { route: String, reason: String },

    #[error("Host router unavailable: {0}")]
    Unavailable(String),
}
