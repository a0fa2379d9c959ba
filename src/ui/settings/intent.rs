use crate::lock::LockConfiguration;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum SettingsIntent {
    /// Show the panel over the current `[lock]` settings.
    Open { current: LockConfiguration },
    Close,
    /// Escape. Unsaved edits need a second Escape to be discarded.
    RequestClose,
    FocusPrevious,
    FocusNext,
    /// Space: flip the focused toggle or step the method forward.
    Activate,
    MethodNext,
    MethodPrevious,
    PinDigit(u8),
    PinBackspace,
}

impl Intent for SettingsIntent {}
