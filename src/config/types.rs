use serde::{Deserialize, Serialize};

use crate::biometric::BiometricOutcome;
use crate::lock::LockConfiguration;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profile: ProfileConfig,
    #[serde(default)]
    pub lock: LockConfiguration,
    #[serde(default)]
    pub biometric: BiometricConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// User profile shown on the home screen.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Display name used in the greeting (empty = anonymous).
    #[serde(default)]
    pub user_name: String,
}

/// Simulated biometric sensor for terminal hosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricConfig {
    /// Whether the simulated sensor reports itself available (default: true).
    #[serde(default = "default_biometric_available")]
    pub available: bool,
    /// Outcome every ceremony resolves with (default: success).
    #[serde(default = "default_biometric_outcome")]
    pub outcome: BiometricOutcome,
    /// Ceremony duration in milliseconds (default: 600).
    #[serde(default = "default_biometric_delay_ms")]
    pub delay_ms: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_biometric_available() -> bool {
    true
}

fn default_biometric_outcome() -> BiometricOutcome {
    BiometricOutcome::Success
}

fn default_biometric_delay_ms() -> u64 {
    600
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for BiometricConfig {
    fn default() -> Self {
        Self {
            available: default_biometric_available(),
            outcome: default_biometric_outcome(),
            delay_ms: default_biometric_delay_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Snapshot of the lock settings handed to the lock controller.
    pub fn lock_configuration(&self) -> LockConfiguration {
        self.lock.clone()
    }
}
