//! Job Onboard — guarded sequential onboarding flow service.

pub mod config;
pub mod error;
pub mod flow;
pub mod guard;
pub mod host;
