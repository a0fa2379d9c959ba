//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

use koin::biometric::{BiometricOutcome, BiometricProvider};
use koin::config::{Config, ConfigStore, PinStore};
use koin::lock::{BiometricCompletion, LockConfiguration, LockController, LockMethod};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{mpsc, oneshot};

/// How long to wait for a ceremony result before giving up.
pub const DELIVERY_TIMEOUT: Duration = Duration::from_secs(1);

/// Create a temporary config file with the given `[lock]` body.
pub fn temp_config(lock_table: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    let content = format!(
        r#"[profile]
user_name = "Test"

[lock]
{}

[logging]
filter = "debug"
"#,
        lock_table
    );
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub fn lock_config(method: LockMethod, lock_on_background: bool) -> LockConfiguration {
    LockConfiguration {
        enabled: true,
        lock_on_background,
        method,
        pin: "1010".parse().expect("valid pin"),
    }
}

// -- Settings source ----------------------------------------------------------

/// Settings source the test can edit between events.
#[derive(Clone)]
pub struct SharedPinStore(Arc<Mutex<LockConfiguration>>);

impl SharedPinStore {
    pub fn new(config: LockConfiguration) -> Self {
        Self(Arc::new(Mutex::new(config)))
    }

    pub fn update(&self, f: impl FnOnce(&mut LockConfiguration)) {
        f(&mut self.0.lock());
    }
}

impl PinStore for SharedPinStore {
    fn lock_configuration(&self) -> LockConfiguration {
        self.0.lock().clone()
    }
}

// -- Biometric mock -----------------------------------------------------------

/// Biometric provider whose ceremonies stay pending until the test
/// resolves them.
pub struct ScriptedBiometrics {
    available: AtomicBool,
    started: AtomicUsize,
    pending: Mutex<VecDeque<oneshot::Sender<BiometricOutcome>>>,
}

impl ScriptedBiometrics {
    pub fn new(available: bool) -> Self {
        Self {
            available: AtomicBool::new(available),
            started: AtomicUsize::new(0),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of `authenticate` calls so far.
    pub fn ceremonies_started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Resolve the oldest pending ceremony. Returns false if none was
    /// pending or its task is gone.
    pub fn resolve_next(&self, outcome: BiometricOutcome) -> bool {
        match self.pending.lock().pop_front() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

impl BiometricProvider for ScriptedBiometrics {
    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn authenticate(&self, _reason: &str) -> futures_core::future::BoxFuture<'static, BiometricOutcome> {
        self.started.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = oneshot::channel();
        self.pending.lock().push_back(tx);
        Box::pin(async move { rx.await.unwrap_or(BiometricOutcome::Failure) })
    }
}

// -- Controller harness -------------------------------------------------------

/// A controller wired to a scripted sensor, an editable settings source
/// and a channel standing in for the UI event loop.
pub struct Harness {
    pub controller: LockController,
    pub sensor: Arc<ScriptedBiometrics>,
    pub store: SharedPinStore,
    pub completions: mpsc::UnboundedReceiver<BiometricCompletion>,
}

/// Must be called inside a tokio runtime.
pub fn harness(config: LockConfiguration, biometric_available: bool) -> Harness {
    let sensor = Arc::new(ScriptedBiometrics::new(biometric_available));
    let store = SharedPinStore::new(config);
    let (tx, completions) = mpsc::unbounded_channel();
    let controller = LockController::new(
        Arc::new(store.clone()),
        sensor.clone(),
        tokio::runtime::Handle::current(),
        Arc::new(move |completion: BiometricCompletion| {
            let _ = tx.send(completion);
        }),
    );
    Harness {
        controller,
        sensor,
        store,
        completions,
    }
}

impl Harness {
    /// Wait for the next finished ceremony.
    pub async fn next_completion(&mut self) -> Option<BiometricCompletion> {
        tokio::time::timeout(DELIVERY_TIMEOUT, self.completions.recv())
            .await
            .ok()
            .flatten()
    }

    /// True if nothing is delivered within a short grace period.
    pub async fn nothing_delivered(&mut self) -> bool {
        tokio::time::timeout(Duration::from_millis(50), self.completions.recv())
            .await
            .is_err()
    }

    /// Resolve the pending ceremony and feed its result back, like the UI
    /// loop does.
    pub async fn resolve_and_deliver(&mut self, outcome: BiometricOutcome) {
        assert!(self.sensor.resolve_next(outcome), "no pending ceremony");
        let completion = self.next_completion().await.expect("completion delivered");
        self.controller.complete(completion);
    }
}

// -- App helpers --------------------------------------------------------------

pub fn make_store(config: Config) -> (TempDir, ConfigStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = ConfigStore::new(config, temp_dir.path().join("config.toml"));
    (temp_dir, store)
}
