//! Lock settings rows and their persistence.

use std::fs;
use std::path::Path;

use toml::{Table, Value};

use crate::config::loader::ConfigError;
use crate::lock::LockConfiguration;

/// One row of the security settings panel.
///
/// The `as_str()` value is used as TOML key inside `[lock]`. Once
/// published, do not rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingId {
    LockEnabled,
    LockOnBackground,
    Method,
    Pin,
}

impl SettingId {
    /// Stable TOML key for persistence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LockEnabled => "enabled",
            Self::LockOnBackground => "lock_on_background",
            Self::Method => "method",
            Self::Pin => "pin",
        }
    }

    /// All variants, in display order.
    pub fn all() -> &'static [SettingId] {
        &[
            Self::LockEnabled,
            Self::LockOnBackground,
            Self::Method,
            Self::Pin,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::LockEnabled => "Lock app",
            Self::LockOnBackground => "Lock when app goes to background",
            Self::Method => "Unlock with",
            Self::Pin => "PIN",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::LockEnabled => "Require biometric or PIN to open Koin",
            Self::LockOnBackground => "Ask again after switching away",
            Self::Method => "←/→ to change",
            Self::Pin => "Type 4 digits to replace",
        }
    }

    /// Whether the row can be changed given the rest of `draft`.
    ///
    /// Everything below "Lock app" depends on the lock being on, and the
    /// PIN only matters to methods that offer the keypad.
    pub fn is_editable(&self, draft: &LockConfiguration) -> bool {
        match self {
            Self::LockEnabled => true,
            Self::LockOnBackground | Self::Method => draft.enabled,
            Self::Pin => draft.enabled && draft.method.includes_pin(),
        }
    }

    /// Shown instead of [`SettingId::description`] while the row is locked.
    pub fn disabled_reason(&self, draft: &LockConfiguration) -> Option<&'static str> {
        if self.is_editable(draft) {
            None
        } else if !draft.enabled {
            Some("Turn on \"Lock app\" first")
        } else {
            Some("Not used by biometric-only unlock")
        }
    }
}

/// Persist `settings` into the `[lock]` table of `path`.
///
/// Every other table and key is preserved. Creates the file and its parent
/// directory if they do not exist yet.
pub fn save_lock_settings(path: &Path, settings: &LockConfiguration) -> Result<(), ConfigError> {
    let mut document: Table = if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        Table::new()
    };

    let lock = document
        .entry("lock")
        .or_insert_with(|| Value::Table(Table::new()))
        .as_table_mut()
        .ok_or_else(|| ConfigError::ValidationError {
            message: "'lock' must be a table".to_string(),
        })?;
    lock.insert(
        SettingId::LockEnabled.as_str().to_string(),
        Value::Boolean(settings.enabled),
    );
    lock.insert(
        SettingId::LockOnBackground.as_str().to_string(),
        Value::Boolean(settings.lock_on_background),
    );
    lock.insert(
        SettingId::Method.as_str().to_string(),
        Value::try_from(settings.method)?,
    );
    lock.insert(
        SettingId::Pin.as_str().to_string(),
        Value::String(String::from(settings.pin.clone())),
    );

    let content = toml::to_string(&document)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        path = %path.display(),
        enabled = settings.enabled,
        lock_on_background = settings.lock_on_background,
        method = ?settings.method,
        "Saved lock settings"
    );
    Ok(())
}
