mod common;

use std::sync::Arc;

use common::{make_store, temp_config};
use koin::biometric::NoBiometrics;
use koin::config::{save_lock_settings, Config, ConfigStore, PinStore};
use koin::lock::{
    BiometricCompletion, LockConfiguration, LockController, LockIntent, LockMethod, Pin,
};
use koin::ui::app::App;
use koin::ui::settings::SettingsIntent;
use tempfile::TempDir;

#[test]
fn save_and_reload_settings() {
    let (_dir, config_path) = temp_config("enabled = false\nmethod = \"numeric_pin\"\npin = \"4321\"");

    let mut lock = Config::load_from(&config_path).unwrap().lock;
    lock.enabled = true;
    lock.lock_on_background = true;
    save_lock_settings(&config_path, &lock).unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert!(config.lock.enabled);
    assert!(config.lock.lock_on_background);
    assert_eq!(config.lock.method, LockMethod::NumericPin);
    assert_eq!(config.lock.pin, "4321".parse::<Pin>().unwrap());
}

#[test]
fn save_preserves_other_sections() {
    let (_dir, config_path) = temp_config("enabled = true");

    save_lock_settings(&config_path, &LockConfiguration::default()).unwrap();

    let config = Config::load_from(&config_path).unwrap();
    assert_eq!(config.profile.user_name, "Test");
    assert_eq!(config.logging.filter, "debug");
    assert!(!config.lock.enabled);
}

#[test]
fn save_creates_config_if_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("subdir").join("config.toml");

    let lock = LockConfiguration {
        enabled: true,
        method: LockMethod::NumericPin,
        ..LockConfiguration::default()
    };
    save_lock_settings(&config_path, &lock).unwrap();

    assert!(config_path.exists());
    let content = std::fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[lock]"));
    assert!(content.contains("enabled = true"));
    assert!(content.contains("lock_on_background = false"));
    assert!(content.contains("method = \"numeric_pin\""));
    assert_eq!(Config::load_from(&config_path).unwrap().lock, lock);
}

#[test]
fn store_reload_picks_up_saved_settings() {
    let (_dir, config_path) = temp_config("enabled = false");
    let store = ConfigStore::new(Config::load_from(&config_path).unwrap(), config_path.clone());
    assert!(!store.lock_configuration().enabled);

    let lock = LockConfiguration {
        enabled: true,
        ..store.lock_configuration()
    };
    save_lock_settings(&config_path, &lock).unwrap();
    assert!(!store.lock_configuration().enabled, "no implicit reload");

    store.reload().unwrap();
    assert!(store.lock_configuration().enabled);
}

#[tokio::test]
async fn disabling_from_settings_panel_persists() {
    let mut config = Config::default();
    config.lock.enabled = true;
    config.lock.method = LockMethod::NumericPin;
    let (dir, store) = make_store(config);
    let pin_store: Arc<dyn PinStore> = Arc::new(store.clone());
    let lock = LockController::new(
        pin_store,
        Arc::new(NoBiometrics),
        tokio::runtime::Handle::current(),
        Arc::new(|_: BiometricCompletion| {}),
    );
    let mut app = App::new(store, lock);

    app.open_settings();
    assert!(!app.settings_dialog().is_visible(), "panel is unreachable while locked");

    for d in [1, 0, 1, 0] {
        app.dispatch_lock(LockIntent::DigitPressed(d));
    }
    app.open_settings();
    app.dispatch_settings(SettingsIntent::Activate);
    app.save_settings();

    let saved = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(!saved.lock.enabled);
    assert!(!app.is_locked());
    assert!(!app.home_summary().lock_enabled);
}

#[tokio::test]
async fn method_chosen_in_panel_persists() {
    let mut config = Config::default();
    config.lock.method = LockMethod::NumericPin;
    let (dir, store) = make_store(config);
    let pin_store: Arc<dyn PinStore> = Arc::new(store.clone());
    let lock = LockController::new(
        pin_store,
        Arc::new(NoBiometrics),
        tokio::runtime::Handle::current(),
        Arc::new(|_: BiometricCompletion| {}),
    );
    let mut app = App::new(store, lock);

    app.open_settings();
    for intent in [
        SettingsIntent::Activate,
        SettingsIntent::FocusNext,
        SettingsIntent::FocusNext,
        SettingsIntent::MethodPrevious,
    ] {
        app.dispatch_settings(intent);
    }
    app.save_settings();

    let saved = Config::load_from(&dir.path().join("config.toml")).unwrap();
    assert!(saved.lock.enabled);
    assert_eq!(saved.lock.method, LockMethod::Biometric);
    assert_eq!(saved.lock.pin, Pin::default());
    assert_eq!(app.home_summary().method, LockMethod::Biometric);
}
