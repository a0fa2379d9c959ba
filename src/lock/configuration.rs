//! Lock settings snapshot consumed by the controller.

use serde::{Deserialize, Serialize};

use super::pin::Pin;

/// Which authentication methods the lock surface offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMethod {
    /// Biometric only. No PIN fallback exists.
    Biometric,
    /// 4-digit PIN only.
    NumericPin,
    /// Biometric first; PIN when the user asks for it or biometric is unavailable.
    #[default]
    BiometricThenPin,
}

impl LockMethod {
    /// Every method, in the order settings cycles through them.
    pub const ALL: [LockMethod; 3] = [Self::Biometric, Self::NumericPin, Self::BiometricThenPin];

    /// Next method in [`LockMethod::ALL`], wrapping around.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn includes_biometric(&self) -> bool {
        matches!(self, Self::Biometric | Self::BiometricThenPin)
    }

    pub fn includes_pin(&self) -> bool {
        matches!(self, Self::NumericPin | Self::BiometricThenPin)
    }

    /// Label shown in settings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Biometric => "Biometric",
            Self::NumericPin => "PIN",
            Self::BiometricThenPin => "Biometric, then PIN",
        }
    }
}

/// Immutable lock settings, as read from the persisted `[lock]` table.
///
/// The controller never mutates this; it re-reads a fresh snapshot at
/// session start and whenever it re-enters the awaiting state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfiguration {
    pub enabled: bool,
    pub lock_on_background: bool,
    pub method: LockMethod,
    pub pin: Pin,
}

impl Default for LockConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            lock_on_background: false,
            method: LockMethod::default(),
            pin: Pin::default(),
        }
    }
}
