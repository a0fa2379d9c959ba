//! Platform biometric capability, as consumed by the lock controller.
//!
//! The ceremony itself is opaque: a provider reports whether a biometric
//! is configured and, when asked, runs a user-mediated check that may
//! suspend for as long as the user takes. Dropping the returned future
//! cancels the ceremony.

mod simulated;

pub use simulated::{NoBiometrics, SimulatedSensor};

use futures_core::future::BoxFuture;
use serde::{Deserialize, Serialize};

/// Result of a single biometric ceremony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiometricOutcome {
    Success,
    /// User cancelled or the match failed.
    Failure,
    /// No biometric capability is configured, or it was revoked.
    Unavailable,
}

/// Abstract biometric capability.
///
/// Implementations must tolerate repeated calls. The controller guarantees
/// at most one `authenticate` call is outstanding at a time.
pub trait BiometricProvider: Send + Sync {
    /// Synchronous availability check. Must not prompt the user.
    fn is_available(&self) -> bool;

    /// Run the ceremony. `reason` is shown to the user by the platform.
    fn authenticate(&self, reason: &str) -> BoxFuture<'static, BiometricOutcome>;
}
