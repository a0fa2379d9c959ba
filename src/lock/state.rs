//! Lock state machine data.

use crate::ui::mvi::UiState;

use super::configuration::{LockConfiguration, LockMethod};
use super::pin::PinBuffer;

/// Foreground state reported by the host environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScenePhase {
    #[default]
    Active,
    Inactive,
    Background,
}

/// Top-level lock phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPhase {
    /// App lock is turned off; content renders unconditionally.
    #[default]
    Disabled,

    /// Lock surface shown, waiting for PIN digits or a biometric trigger.
    AwaitingAuth,

    /// A biometric ceremony tagged with `generation` is in flight.
    Authenticating { generation: u64 },

    /// Content is visible until the next qualifying relock.
    Unlocked,
}

/// Non-fatal failure recorded by the last authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockFailure {
    /// No biometric capability is configured on this device.
    BiometricUnavailable,
    /// The ceremony failed or the user cancelled it.
    BiometricDenied,
    /// A full PIN was entered and did not match.
    PinMismatch,
}

/// Which lock surface the presentation layer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Biometric,
    Pin,
    BiometricUnavailableNotice,
}

/// Per-episode runtime state. Replaced wholesale when a new unlock
/// attempt cycle starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockSession {
    pub entered_pin: PinBuffer,
    /// User opted into PIN entry, or biometric turned out to be unavailable.
    pub biometric_fallback_active: bool,
    /// Biometric-only lock with no usable biometric capability.
    pub biometric_unavailable: bool,
}

/// Full lock controller state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LockState {
    pub config: LockConfiguration,
    /// Last biometric availability check.
    pub biometric_available: bool,
    pub phase: LockPhase,
    pub session: LockSession,
    pub scene: ScenePhase,
    /// Session generation; bumped at the start of every awaiting episode.
    pub generation: u64,
    /// Monotonic wrong-PIN counter.
    pub shake_signal: u64,
    /// Set when `shake_signal` moved and the view has not played it yet.
    pub shake_pending: bool,
    /// One-shot "Forgot PIN?" request for the host.
    pub forgot_pin_requested: bool,
    pub last_failure: Option<LockFailure>,
}

impl UiState for LockState {}

/// Render-ready projection of [`LockState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub locked: bool,
    pub mode: LockMode,
    pub pin_entry_length: usize,
    pub shake_signal: u64,
    pub authenticating: bool,
    pub can_switch_to_pin: bool,
    pub can_switch_to_biometric: bool,
    pub last_failure: Option<LockFailure>,
}

impl LockState {
    /// True while the lock surface must cover the content.
    pub fn is_locked(&self) -> bool {
        matches!(
            self.phase,
            LockPhase::AwaitingAuth | LockPhase::Authenticating { .. }
        )
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.phase, LockPhase::Authenticating { .. })
    }

    pub fn mode(&self) -> LockMode {
        match self.config.method {
            LockMethod::NumericPin => LockMode::Pin,
            LockMethod::Biometric if self.session.biometric_unavailable => {
                LockMode::BiometricUnavailableNotice
            }
            LockMethod::Biometric => LockMode::Biometric,
            LockMethod::BiometricThenPin if self.session.biometric_fallback_active => {
                LockMode::Pin
            }
            LockMethod::BiometricThenPin => LockMode::Biometric,
        }
    }

    /// Digits are only accepted while the PIN pad is shown and no
    /// ceremony is in flight.
    pub fn accepts_pin_entry(&self) -> bool {
        self.phase == LockPhase::AwaitingAuth
            && self.config.method.includes_pin()
            && self.mode() == LockMode::Pin
    }

    /// The biometric surface is up and a ceremony may be started.
    pub fn offers_biometric(&self) -> bool {
        self.phase == LockPhase::AwaitingAuth
            && self.config.method.includes_biometric()
            && !self.session.biometric_fallback_active
    }

    pub fn can_switch_to_pin(&self) -> bool {
        self.phase == LockPhase::AwaitingAuth
            && self.config.method == LockMethod::BiometricThenPin
            && !self.session.biometric_fallback_active
    }

    pub fn can_switch_to_biometric(&self) -> bool {
        self.phase == LockPhase::AwaitingAuth
            && self.config.method == LockMethod::BiometricThenPin
            && self.session.biometric_fallback_active
            && self.biometric_available
    }

    pub fn render_state(&self) -> RenderState {
        RenderState {
            locked: self.is_locked(),
            mode: self.mode(),
            pin_entry_length: self.session.entered_pin.len(),
            shake_signal: self.shake_signal,
            authenticating: self.is_authenticating(),
            can_switch_to_pin: self.can_switch_to_pin(),
            can_switch_to_biometric: self.can_switch_to_biometric(),
            last_failure: self.last_failure,
        }
    }
}
