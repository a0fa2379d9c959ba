use std::time::Duration;

use futures_core::future::BoxFuture;

use crate::config::BiometricConfig;

use super::{BiometricOutcome, BiometricProvider};

/// Stand-in sensor for hosts without biometric hardware.
///
/// Resolves every ceremony with the configured outcome after `delay`.
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    available: bool,
    outcome: BiometricOutcome,
    delay: Duration,
}

impl SimulatedSensor {
    pub fn new(available: bool, outcome: BiometricOutcome, delay: Duration) -> Self {
        Self {
            available,
            outcome,
            delay,
        }
    }

    pub fn from_config(config: &BiometricConfig) -> Self {
        Self::new(
            config.available,
            config.outcome,
            Duration::from_millis(config.delay_ms),
        )
    }
}

impl BiometricProvider for SimulatedSensor {
    fn is_available(&self) -> bool {
        self.available
    }

    fn authenticate(&self, reason: &str) -> BoxFuture<'static, BiometricOutcome> {
        let outcome = if self.available {
            self.outcome
        } else {
            BiometricOutcome::Unavailable
        };
        let delay = self.delay;
        tracing::debug!(reason, delay_ms = delay.as_millis() as u64, "Simulated biometric ceremony started");
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            outcome
        })
    }
}

/// Provider for devices with no biometric capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiometrics;

impl BiometricProvider for NoBiometrics {
    fn is_available(&self) -> bool {
        false
    }

    fn authenticate(&self, _reason: &str) -> BoxFuture<'static, BiometricOutcome> {
        Box::pin(async { BiometricOutcome::Unavailable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_sensor_yields_configured_outcome() {
        let sensor = SimulatedSensor::new(true, BiometricOutcome::Failure, Duration::ZERO);
        assert!(sensor.is_available());
        assert_eq!(sensor.authenticate("test").await, BiometricOutcome::Failure);
    }

    #[tokio::test]
    async fn unavailable_sensor_reports_unavailable() {
        let sensor = SimulatedSensor::new(false, BiometricOutcome::Success, Duration::ZERO);
        assert!(!sensor.is_available());
        assert_eq!(
            sensor.authenticate("test").await,
            BiometricOutcome::Unavailable
        );
    }

    #[tokio::test]
    async fn no_biometrics_is_never_available() {
        assert!(!NoBiometrics.is_available());
        assert_eq!(
            NoBiometrics.authenticate("test").await,
            BiometricOutcome::Unavailable
        );
    }

    #[test]
    fn from_config_copies_fields() {
        let config = BiometricConfig {
            available: false,
            outcome: BiometricOutcome::Failure,
            delay_ms: 250,
        };
        let sensor = SimulatedSensor::from_config(&config);
        assert!(!sensor.is_available());
        assert_eq!(sensor.delay, Duration::from_millis(250));
    }
}
