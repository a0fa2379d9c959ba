use crate::config::{save_lock_settings, ConfigStore};
use crate::lock::{
    BiometricCompletion, LockController, LockIntent, LockMethod, RenderState, ScenePhase,
};
use crate::ui::mvi::Reducer;
use crate::ui::settings::{SettingsDialogState, SettingsIntent, SettingsReducer};
use crate::ui::shake::ShakeAnimation;

/// Generic MVI dispatch: takes current state, runs reducer, stores result.
macro_rules! dispatch_mvi {
    ($self:expr, $field:ident, $reducer:ty, $intent:expr) => {
        $self.$field = <$reducer>::reduce(std::mem::take(&mut $self.$field), $intent);
    };
}

/// Snapshot of the guarded home screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeSummary {
    pub user_name: String,
    pub lock_enabled: bool,
    pub lock_on_background: bool,
    pub method: LockMethod,
}

pub struct App {
    should_quit: bool,
    config: ConfigStore,
    /// App lock (MVI pattern, driven through the controller).
    lock: LockController,
    /// State of the settings panel (MVI pattern).
    settings_dialog: SettingsDialogState,
    shake: ShakeAnimation,
    /// Spinner frame counter.
    animation_tick: u8,
    /// One-line message under the current surface.
    status: Option<String>,
}

impl App {
    pub fn new(config: ConfigStore, lock: LockController) -> Self {
        Self {
            should_quit: false,
            config,
            lock,
            settings_dialog: SettingsDialogState::default(),
            shake: ShakeAnimation::default(),
            animation_tick: 0,
            status: None,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_tick(&mut self) {
        self.shake.tick();
        self.animation_tick = self.animation_tick.wrapping_add(1);
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ========================================================================
    // App lock
    // ========================================================================

    /// True while the lock surface covers the content.
    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn lock_render_state(&self) -> RenderState {
        self.lock.render_state()
    }

    /// Current horizontal shake offset of the PIN slots.
    pub fn shake_offset(&self) -> i16 {
        self.shake.offset()
    }

    pub fn dispatch_lock(&mut self, intent: LockIntent) {
        let was_locked = self.lock.is_locked();
        self.lock.dispatch(intent);
        self.after_lock_change(was_locked);
    }

    pub fn on_lifecycle(&mut self, scene: ScenePhase) {
        tracing::debug!(?scene, "Lifecycle transition");
        self.dispatch_lock(LockIntent::Lifecycle(scene));
    }

    pub fn on_biometric(&mut self, completion: BiometricCompletion) {
        let was_locked = self.lock.is_locked();
        self.lock.complete(completion);
        self.after_lock_change(was_locked);
    }

    fn after_lock_change(&mut self, was_locked: bool) {
        let locked = self.lock.is_locked();
        if was_locked != locked {
            self.status = None;
            self.shake.stop();
        }
        if self.lock.take_shake() {
            self.shake.start();
        }
        if self.lock.take_forgot_pin() {
            self.status = Some(format!(
                "Your PIN is stored in {} under [lock] pin",
                self.config.path().display()
            ));
        }
    }

    // ========================================================================
    // Guarded content
    // ========================================================================

    pub fn home_summary(&self) -> HomeSummary {
        let config = self.config.get();
        HomeSummary {
            user_name: config.profile.user_name,
            lock_enabled: config.lock.enabled,
            lock_on_background: config.lock.lock_on_background,
            method: config.lock.method,
        }
    }

    // ========================================================================
    // Settings panel (MVI pattern)
    // ========================================================================

    pub fn settings_dialog(&self) -> &SettingsDialogState {
        &self.settings_dialog
    }

    pub fn dispatch_settings(&mut self, intent: SettingsIntent) {
        dispatch_mvi!(self, settings_dialog, SettingsReducer, intent);
    }

    /// Open the panel. Settings are guarded content too.
    pub fn open_settings(&mut self) {
        if self.lock.is_locked() {
            return;
        }
        let current = self.config.get().lock;
        self.dispatch_settings(SettingsIntent::Open { current });
    }

    /// Persist the edited draft, reload the store and let the lock re-read
    /// its settings. Digits of an unfinished new PIN are dropped.
    pub fn save_settings(&mut self) {
        let Some(panel) = self.settings_dialog.panel() else {
            return;
        };
        let result = save_lock_settings(self.config.path(), &panel.draft)
            .and_then(|()| self.config.reload());
        match result {
            Ok(()) => {
                self.dispatch_settings(SettingsIntent::Close);
                self.status = Some("Settings saved".to_string());
                let was_locked = self.lock.is_locked();
                self.lock.refresh();
                self.after_lock_change(was_locked);
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to save settings");
                self.status = Some(format!("Could not save settings: {}", err));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biometric::NoBiometrics;
    use crate::config::{Config, PinStore};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn make_app(dir: &TempDir, config: Config) -> App {
        let store = ConfigStore::new(config, dir.path().join("config.toml"));
        let pin_store: Arc<dyn PinStore> = Arc::new(store.clone());
        let lock = LockController::new(
            pin_store,
            Arc::new(NoBiometrics),
            tokio::runtime::Handle::current(),
            Arc::new(|_: BiometricCompletion| {}),
        );
        App::new(store, lock)
    }

    fn pin_locked_config() -> Config {
        let mut config = Config::default();
        config.lock.enabled = true;
        config.lock.method = LockMethod::NumericPin;
        config
    }

    #[tokio::test]
    async fn unlocked_when_lock_disabled() {
        let dir = TempDir::new().unwrap();
        let app = make_app(&dir, Config::default());
        assert!(!app.is_locked());
    }

    #[tokio::test]
    async fn wrong_pin_starts_shake_once() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, pin_locked_config());
        for d in [9, 9, 9, 9] {
            app.dispatch_lock(LockIntent::DigitPressed(d));
        }
        assert!(app.is_locked());
        assert_ne!(app.shake_offset(), 0);

        // A redraw-only cycle must not restart it.
        for _ in 0..10 {
            app.on_tick();
        }
        assert_eq!(app.shake_offset(), 0);
        app.dispatch_lock(LockIntent::BackspacePressed);
        assert_eq!(app.shake_offset(), 0);
    }

    #[tokio::test]
    async fn forgot_pin_shows_config_location() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, pin_locked_config());
        app.dispatch_lock(LockIntent::ForgotPinRequested);
        let status = app.status().unwrap();
        assert!(status.contains("config.toml"));
        assert!(app.is_locked());
    }

    #[tokio::test]
    async fn unlocking_clears_status() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, pin_locked_config());
        app.dispatch_lock(LockIntent::ForgotPinRequested);
        for d in [1, 0, 1, 0] {
            app.dispatch_lock(LockIntent::DigitPressed(d));
        }
        assert!(!app.is_locked());
        assert!(app.status().is_none());
    }

    #[tokio::test]
    async fn saving_settings_enables_lock() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.lock.method = LockMethod::NumericPin;
        let mut app = make_app(&dir, config);
        assert!(!app.is_locked());

        app.open_settings();
        app.dispatch_settings(SettingsIntent::Activate);
        app.save_settings();

        assert!(!app.settings_dialog().is_visible());
        assert!(app.is_locked());
        assert!(app.home_summary().lock_enabled);
        assert!(dir.path().join("config.toml").exists());
    }

    #[tokio::test]
    async fn saved_pin_change_applies_to_next_lock() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.lock.method = LockMethod::NumericPin;
        let mut app = make_app(&dir, config);

        app.open_settings();
        app.dispatch_settings(SettingsIntent::Activate);
        app.dispatch_settings(SettingsIntent::FocusPrevious);
        for d in [2, 4, 6, 8] {
            app.dispatch_settings(SettingsIntent::PinDigit(d));
        }
        app.save_settings();
        assert!(app.is_locked());

        for d in [1, 0, 1, 0] {
            app.dispatch_lock(LockIntent::DigitPressed(d));
        }
        assert!(app.is_locked());
        for d in [2, 4, 6, 8] {
            app.dispatch_lock(LockIntent::DigitPressed(d));
        }
        assert!(!app.is_locked());
    }

    #[tokio::test]
    async fn save_without_open_panel_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, Config::default());
        app.save_settings();
        assert!(!dir.path().join("config.toml").exists());
    }
}
