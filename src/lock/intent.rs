//! Events fed into the lock state machine.

use crate::biometric::BiometricOutcome;
use crate::ui::mvi::Intent;

use super::configuration::LockConfiguration;
use super::state::ScenePhase;

/// Every external occurrence the lock reacts to.
#[derive(Debug, Clone)]
pub enum LockIntent {
    /// Fresh settings snapshot plus current biometric availability.
    Refresh {
        config: LockConfiguration,
        biometric_available: bool,
    },

    /// Host foreground state changed.
    Lifecycle(ScenePhase),

    DigitPressed(u8),

    BackspacePressed,

    /// User tapped the biometric card.
    BiometricTriggerRequested,

    /// User chose "Enter PIN" on the biometric surface.
    SwitchToPinRequested,

    /// User went back from the PIN pad to the biometric surface.
    SwitchToBiometricRequested,

    /// User tapped "Forgot PIN?".
    ForgotPinRequested,

    /// A biometric ceremony finished.
    BiometricResolved {
        generation: u64,
        outcome: BiometricOutcome,
    },

    /// The view played the pending rejection animation.
    ShakeConsumed,

    /// The host handled the forgot-PIN request.
    ForgotPinAcknowledged,
}

impl Intent for LockIntent {}
