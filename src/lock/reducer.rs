//! Reducer for the app lock.

use crate::biometric::BiometricOutcome;
use crate::ui::mvi::Reducer;

use super::configuration::{LockConfiguration, LockMethod};
use super::intent::LockIntent;
use super::state::{LockFailure, LockPhase, LockSession, LockState, ScenePhase};

/// Reducer for lock state transitions.
///
/// Pure function. Starting biometric ceremonies and delivering their
/// results is the controller's job; the reducer only decides when the
/// state enters `Authenticating` and whether a result still applies.
pub struct LockReducer;

impl Reducer for LockReducer {
    type State = LockState;
    type Intent = LockIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            LockIntent::Refresh {
                config,
                biometric_available,
            } => refresh(state, config, biometric_available),

            LockIntent::Lifecycle(scene) => lifecycle(state, scene),

            LockIntent::DigitPressed(digit) => {
                let mut state = state;
                if !state.accepts_pin_entry() || !state.session.entered_pin.push(digit) {
                    return state;
                }
                if state.session.entered_pin.is_full() {
                    if state.config.pin.matches(&state.session.entered_pin) {
                        unlock(&mut state);
                    } else {
                        state.session.entered_pin.clear();
                        state.shake_signal += 1;
                        state.shake_pending = true;
                        state.last_failure = Some(LockFailure::PinMismatch);
                    }
                }
                state
            }

            LockIntent::BackspacePressed => {
                let mut state = state;
                if state.accepts_pin_entry() {
                    state.session.entered_pin.pop();
                }
                state
            }

            LockIntent::BiometricTriggerRequested => {
                let mut state = state;
                if state.offers_biometric() {
                    attempt_biometric(&mut state);
                }
                state
            }

            LockIntent::SwitchToPinRequested => {
                let mut state = state;
                if state.can_switch_to_pin() {
                    state.session.biometric_fallback_active = true;
                }
                state
            }

            LockIntent::SwitchToBiometricRequested => {
                let mut state = state;
                if state.can_switch_to_biometric() {
                    state.session.entered_pin.clear();
                    state.session.biometric_fallback_active = false;
                }
                state
            }

            LockIntent::ForgotPinRequested => {
                let mut state = state;
                if state.accepts_pin_entry() {
                    state.forgot_pin_requested = true;
                }
                state
            }

            LockIntent::BiometricResolved {
                generation,
                outcome,
            } => resolve_biometric(state, generation, outcome),

            LockIntent::ShakeConsumed => LockState {
                shake_pending: false,
                ..state
            },

            LockIntent::ForgotPinAcknowledged => LockState {
                forgot_pin_requested: false,
                ..state
            },
        }
    }
}

fn refresh(mut state: LockState, config: LockConfiguration, biometric_available: bool) -> LockState {
    let method_changed = state.config.method != config.method;
    state.biometric_available = biometric_available;
    state.config = config;

    match (state.phase, state.config.enabled) {
        (LockPhase::Disabled, false) => {}
        (_, false) => {
            // Invalidate anything in flight before dropping the gate.
            state.generation += 1;
            state.session = LockSession::default();
            state.phase = LockPhase::Disabled;
            state.last_failure = None;
        }
        (LockPhase::Disabled, true) => {
            begin_episode(&mut state);
            evaluate_auto_biometric(&mut state);
        }
        (LockPhase::Unlocked, true) => {}
        (_, true) if method_changed => {
            begin_episode(&mut state);
            evaluate_auto_biometric(&mut state);
        }
        (_, true) => {}
    }
    state
}

fn lifecycle(mut state: LockState, scene: ScenePhase) -> LockState {
    state.scene = scene;
    match scene {
        ScenePhase::Active => {
            if state.phase == LockPhase::AwaitingAuth {
                evaluate_auto_biometric(&mut state);
            }
        }
        ScenePhase::Inactive | ScenePhase::Background => {
            let backgrounded = scene == ScenePhase::Background;
            match state.phase {
                LockPhase::Disabled => {}
                LockPhase::Unlocked => {
                    if state.config.lock_on_background {
                        begin_episode(&mut state);
                    }
                }
                LockPhase::Authenticating { .. } => {
                    // A late result from a backgrounded ceremony must not unlock.
                    if backgrounded {
                        begin_episode(&mut state);
                    }
                }
                LockPhase::AwaitingAuth => {
                    if backgrounded && state.config.lock_on_background {
                        begin_episode(&mut state);
                    } else if backgrounded || state.config.lock_on_background {
                        state.session.entered_pin.clear();
                    }
                }
            }
        }
    }
    state
}

fn resolve_biometric(
    mut state: LockState,
    generation: u64,
    outcome: BiometricOutcome,
) -> LockState {
    match state.phase {
        LockPhase::Authenticating { generation: current } if current == generation => {}
        _ => return state,
    }

    match outcome {
        BiometricOutcome::Success => unlock(&mut state),
        BiometricOutcome::Failure => {
            state.phase = LockPhase::AwaitingAuth;
            state.last_failure = Some(LockFailure::BiometricDenied);
        }
        BiometricOutcome::Unavailable => {
            state.phase = LockPhase::AwaitingAuth;
            state.biometric_available = false;
            mark_biometric_unavailable(&mut state);
        }
    }
    state
}

/// Start a fresh unlock attempt cycle.
fn begin_episode(state: &mut LockState) {
    state.generation += 1;
    state.session = LockSession::default();
    state.phase = LockPhase::AwaitingAuth;
    state.last_failure = None;
}

/// Auto-prompt for biometric when the surface is up, in the foreground,
/// and the user has not fallen back to PIN.
fn evaluate_auto_biometric(state: &mut LockState) {
    if state.scene != ScenePhase::Active {
        return;
    }
    if state.offers_biometric() {
        attempt_biometric(state);
    }
}

fn attempt_biometric(state: &mut LockState) {
    if state.biometric_available {
        state.session.biometric_unavailable = false;
        state.phase = LockPhase::Authenticating {
            generation: state.generation,
        };
    } else {
        mark_biometric_unavailable(state);
    }
}

fn mark_biometric_unavailable(state: &mut LockState) {
    state.last_failure = Some(LockFailure::BiometricUnavailable);
    match state.config.method {
        LockMethod::BiometricThenPin => state.session.biometric_fallback_active = true,
        LockMethod::Biometric => state.session.biometric_unavailable = true,
        LockMethod::NumericPin => {}
    }
}

fn unlock(state: &mut LockState) {
    state.phase = LockPhase::Unlocked;
    state.session = LockSession::default();
    state.shake_pending = false;
    state.last_failure = None;
}
