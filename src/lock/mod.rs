//! App lock: the gate between the user and the app's content.
//!
//! # Architecture
//!
//! Uses the MVI pattern from [`crate::ui::mvi`]:
//! - `state.rs` - Lock phase (Disabled → AwaitingAuth ⇄ Authenticating → Unlocked)
//!   plus the per-episode session
//! - `intent.rs` - User input, lifecycle, settings refresh and biometric results
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `controller.rs` - Re-reads settings, spawns and cancels biometric ceremonies,
//!   discards results from stale generations
//!
//! `pin.rs` holds the PIN value type and entry buffer; `configuration.rs` the
//! immutable settings snapshot.

mod configuration;
mod controller;
mod intent;
mod pin;
mod reducer;
mod state;

pub use configuration::{LockConfiguration, LockMethod};
pub use controller::{BiometricCompletion, CompletionSink, LockController, UNLOCK_REASON};
pub use intent::LockIntent;
pub use pin::{Pin, PinBuffer, PinError, DEFAULT_PIN, PIN_LENGTH};
pub use reducer::LockReducer;
pub use state::{LockFailure, LockMode, LockPhase, LockSession, LockState, RenderState, ScenePhase};
