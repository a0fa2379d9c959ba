//! Lock controller: owns the lock state and drives biometric ceremonies.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::biometric::{BiometricOutcome, BiometricProvider};
use crate::config::PinStore;
use crate::ui::mvi::Reducer;

use super::intent::LockIntent;
use super::reducer::LockReducer;
use super::state::{LockPhase, LockState, RenderState};

/// Reason string shown by the platform during the ceremony.
pub const UNLOCK_REASON: &str = "Unlock the view";

/// Result of a ceremony, tagged with the session generation it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiometricCompletion {
    pub generation: u64,
    pub outcome: BiometricOutcome,
}

impl From<BiometricCompletion> for LockIntent {
    fn from(completion: BiometricCompletion) -> Self {
        LockIntent::BiometricResolved {
            generation: completion.generation,
            outcome: completion.outcome,
        }
    }
}

/// Where finished ceremonies are delivered. The host must feed them back
/// through [`LockController::dispatch`] on the thread that owns the
/// controller.
pub type CompletionSink = Arc<dyn Fn(BiometricCompletion) + Send + Sync>;

struct InFlight {
    generation: u64,
    task: JoinHandle<()>,
}

/// Serializes every lock mutation through [`dispatch`](Self::dispatch).
///
/// Side effects live here, around the pure [`LockReducer`]: settings and
/// capability are re-read before lifecycle and trigger events, and a
/// ceremony task is spawned whenever the state enters `Authenticating`
/// for a generation that has no task yet.
pub struct LockController {
    state: LockState,
    store: Arc<dyn PinStore>,
    provider: Arc<dyn BiometricProvider>,
    runtime: Handle,
    sink: CompletionSink,
    in_flight: Option<InFlight>,
}

impl LockController {
    /// Create the controller and read the initial settings snapshot.
    pub fn new(
        store: Arc<dyn PinStore>,
        provider: Arc<dyn BiometricProvider>,
        runtime: Handle,
        sink: CompletionSink,
    ) -> Self {
        let mut controller = Self {
            state: LockState::default(),
            store,
            provider,
            runtime,
            sink,
            in_flight: None,
        };
        controller.refresh();
        controller
    }

    pub fn state(&self) -> &LockState {
        &self.state
    }

    pub fn render_state(&self) -> RenderState {
        self.state.render_state()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    /// Re-read settings and capability. Call after the settings source changed.
    pub fn refresh(&mut self) {
        let intent = LockIntent::Refresh {
            config: self.store.lock_configuration(),
            biometric_available: self.provider.is_available(),
        };
        self.apply(intent);
    }

    /// Single entry point for every lock event.
    pub fn dispatch(&mut self, intent: LockIntent) {
        match &intent {
            LockIntent::Lifecycle(_) | LockIntent::BiometricTriggerRequested => self.refresh(),
            LockIntent::BiometricResolved { generation, outcome } => {
                let current = match self.state.phase {
                    LockPhase::Authenticating { generation } => Some(generation),
                    _ => None,
                };
                if current != Some(*generation) {
                    tracing::warn!(
                        generation,
                        ?current,
                        ?outcome,
                        "Discarding stale biometric result"
                    );
                    return;
                }
            }
            _ => {}
        }
        self.apply(intent);
    }

    /// Deliver a finished ceremony.
    pub fn complete(&mut self, completion: BiometricCompletion) {
        self.dispatch(completion.into());
    }

    /// Consume the pending rejection animation, if any.
    pub fn take_shake(&mut self) -> bool {
        if !self.state.shake_pending {
            return false;
        }
        self.apply(LockIntent::ShakeConsumed);
        true
    }

    /// Consume a pending "Forgot PIN?" request, if any.
    pub fn take_forgot_pin(&mut self) -> bool {
        if !self.state.forgot_pin_requested {
            return false;
        }
        self.apply(LockIntent::ForgotPinAcknowledged);
        true
    }

    fn apply(&mut self, intent: LockIntent) {
        let before = self.state.phase;
        let was_locked = self.state.is_locked();
        let state = std::mem::take(&mut self.state);
        self.state = LockReducer::reduce(state, intent);

        if before != self.state.phase {
            tracing::debug!(
                from = ?before,
                to = ?self.state.phase,
                pin_entry_length = self.state.session.entered_pin.len(),
                "Lock phase changed"
            );
        }
        match (was_locked, self.state.is_locked()) {
            (true, false) => tracing::info!("App unlocked"),
            (false, true) => tracing::info!(generation = self.state.generation, "App locked"),
            _ => {}
        }

        self.sync_ceremony();
    }

    /// Keep exactly one task per `Authenticating` generation and none otherwise.
    fn sync_ceremony(&mut self) {
        match self.state.phase {
            LockPhase::Authenticating { generation } => {
                if matches!(&self.in_flight, Some(f) if f.generation == generation) {
                    return;
                }
                self.cancel_ceremony();
                self.start_ceremony(generation);
            }
            _ => self.cancel_ceremony(),
        }
    }

    fn start_ceremony(&mut self, generation: u64) {
        tracing::debug!(generation, "Starting biometric ceremony");
        let ceremony = self.provider.authenticate(UNLOCK_REASON);
        let sink = Arc::clone(&self.sink);
        let task = self.runtime.spawn(async move {
            let outcome = ceremony.await;
            sink(BiometricCompletion {
                generation,
                outcome,
            });
        });
        self.in_flight = Some(InFlight { generation, task });
    }

    fn cancel_ceremony(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            if !in_flight.task.is_finished() {
                tracing::debug!(generation = in_flight.generation, "Cancelling biometric ceremony");
            }
            in_flight.task.abort();
        }
    }
}

impl Drop for LockController {
    fn drop(&mut self) {
        self.cancel_ceremony();
    }
}
