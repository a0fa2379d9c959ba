use crate::lock::LockIntent;
use crate::ui::app::App;
use crate::ui::settings::SettingsIntent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Action to take after processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// No further action needed (handled internally).
    None,
    /// Suspend the process (job control), backgrounding the app.
    Suspend,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> InputAction {
    if key.kind != KeyEventKind::Press {
        return InputAction::None;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return InputAction::None;
    }
    if is_ctrl_char(key, 'z') {
        return InputAction::Suspend;
    }

    // The lock surface swallows everything else while it is up
    if app.is_locked() {
        if let Some(intent) = lock_intent_for(key) {
            app.dispatch_lock(intent);
        }
        return InputAction::None;
    }

    if app.settings_dialog().is_visible() {
        if key.code == KeyCode::Enter {
            app.save_settings();
        } else if let Some(intent) = settings_intent_for(key) {
            app.dispatch_settings(intent);
        }
        return InputAction::None;
    }

    match key.code {
        KeyCode::Char('s') => app.open_settings(),
        KeyCode::Char('q') => app.request_quit(),
        _ => {}
    }
    InputAction::None
}

/// Keys understood by the lock surface.
fn lock_intent_for(key: KeyEvent) -> Option<LockIntent> {
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            ch.to_digit(10).map(|d| LockIntent::DigitPressed(d as u8))
        }
        KeyCode::Backspace | KeyCode::Delete => Some(LockIntent::BackspacePressed),
        KeyCode::Enter | KeyCode::Char(' ') => Some(LockIntent::BiometricTriggerRequested),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(LockIntent::SwitchToPinRequested),
        KeyCode::Esc | KeyCode::Left => Some(LockIntent::SwitchToBiometricRequested),
        KeyCode::Char('?') | KeyCode::Char('f') | KeyCode::Char('F') => {
            Some(LockIntent::ForgotPinRequested)
        }
        _ => None,
    }
}

/// Keys understood by the settings panel, apart from Enter (save).
fn settings_intent_for(key: KeyEvent) -> Option<SettingsIntent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(SettingsIntent::FocusPrevious),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => Some(SettingsIntent::FocusNext),
        KeyCode::Char(' ') => Some(SettingsIntent::Activate),
        KeyCode::Left | KeyCode::Char('h') => Some(SettingsIntent::MethodPrevious),
        KeyCode::Right | KeyCode::Char('l') => Some(SettingsIntent::MethodNext),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            ch.to_digit(10).map(|d| SettingsIntent::PinDigit(d as u8))
        }
        KeyCode::Backspace => Some(SettingsIntent::PinBackspace),
        KeyCode::Esc => Some(SettingsIntent::RequestClose),
        _ => None,
    }
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && !key.modifiers.contains(KeyModifiers::SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biometric::NoBiometrics;
    use crate::config::{Config, ConfigStore, PinStore, SettingId};
    use crate::lock::{BiometricCompletion, LockController, LockMethod};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn make_app(dir: &TempDir, enabled: bool) -> App {
        let mut config = Config::default();
        config.lock.enabled = enabled;
        config.lock.method = LockMethod::NumericPin;
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

    #[test]
    fn digit_keys_map_to_pin_entry() {
        assert!(matches!(
            lock_intent_for(press(KeyCode::Char('7'))),
            Some(LockIntent::DigitPressed(7))
        ));
        assert!(matches!(
            lock_intent_for(press(KeyCode::Backspace)),
            Some(LockIntent::BackspacePressed)
        ));
        assert!(matches!(
            lock_intent_for(press(KeyCode::Enter)),
            Some(LockIntent::BiometricTriggerRequested)
        ));
        assert!(lock_intent_for(ctrl('1')).is_none());
        assert!(lock_intent_for(press(KeyCode::Char('x'))).is_none());
    }

    #[test]
    fn ctrl_char_ignores_shift() {
        assert!(is_ctrl_char(ctrl('q'), 'q'));
        let shifted = KeyEvent::new(
            KeyCode::Char('Q'),
            KeyModifiers::CONTROL | KeyModifiers::SHIFT,
        );
        assert!(!is_ctrl_char(shifted, 'q'));
    }

    #[tokio::test]
    async fn typing_the_pin_unlocks() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, true);
        assert!(app.is_locked());
        for ch in ['1', '0', '1', '0'] {
            handle_key(&mut app, press(KeyCode::Char(ch)));
        }
        assert!(!app.is_locked());
    }

    #[tokio::test]
    async fn settings_key_is_ignored_while_locked() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, true);
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(!app.settings_dialog().is_visible());
    }

    #[tokio::test]
    async fn quit_and_suspend_work_everywhere() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, true);
        assert_eq!(handle_key(&mut app, ctrl('z')), InputAction::Suspend);
        assert!(!app.should_quit());
        handle_key(&mut app, ctrl('q'));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn settings_panel_keys() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, false);
        handle_key(&mut app, press(KeyCode::Char('s')));
        assert!(app.settings_dialog().is_visible());
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.settings_dialog().is_visible());
    }

    #[tokio::test]
    async fn settings_keys_change_method() {
        let dir = TempDir::new().unwrap();
        let mut app = make_app(&dir, false);
        handle_key(&mut app, press(KeyCode::Char('s')));
        handle_key(&mut app, press(KeyCode::Char(' ')));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Down));
        handle_key(&mut app, press(KeyCode::Right));

        let panel = app.settings_dialog().panel().unwrap();
        assert_eq!(panel.focused, SettingId::Method);
        assert!(panel.draft.enabled);
        assert_ne!(panel.draft.method, app.home_summary().method);
    }
}
