//! Configuration types.

use std::time::Duration;

use crate::error::ConfigError;
use crate::flow::model::ProfileField;

/// Flow configuration.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Profile fields that must be non-empty for the profile step to pass.
    pub required_profile_fields: Vec<ProfileField>,
    /// Maximum number of job preferences a user may select.
    pub max_preference_selections: usize,
    /// Guard cooldown: re-entrant transitions within this window are dropped.
    pub guard_cooldown: Duration,
    /// HTTP listen port.
    pub port: u16,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            required_profile_fields: vec![ProfileField::FullName, ProfileField::Email],
            max_preference_selections: 5,
            guard_cooldown: Duration::from_millis(800),
            port: 8090,
        }
    }
}

impl FlowConfig {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognized: `ONBOARD_PORT`, `ONBOARD_COOLDOWN_MS`, `ONBOARD_MAX_PREFS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("ONBOARD_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARD_PORT".to_string(),
                message: format!("not a valid port: {port}"),
            })?;
        }

        if let Ok(ms) = std::env::var("ONBOARD_COOLDOWN_MS") {
            let ms: u64 = ms.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARD_COOLDOWN_MS".to_string(),
                message: format!("not a valid duration in ms: {ms}"),
            })?;
            config.guard_cooldown = Duration::from_millis(ms);
        }

        if let Ok(max) = std::env::var("ONBOARD_MAX_PREFS") {
            let max: usize = max.parse().map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARD_MAX_PREFS".to_string(),
                message: format!("not a valid count: {max}"),
            })?;
            if max == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "ONBOARD_MAX_PREFS".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
            config.max_preference_selections = max;
        }

        Ok(config)
    }
}
