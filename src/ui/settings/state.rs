use crate::config::SettingId;
use crate::lock::{LockConfiguration, PinBuffer};
use crate::ui::mvi::UiState;

/// An open settings panel editing a copy of the `[lock]` table.
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityPanel {
    /// Settings as loaded; the baseline for `is_dirty`.
    pub saved: LockConfiguration,
    pub draft: LockConfiguration,
    pub focused: SettingId,
    /// Digits typed on the PIN row. Replaces `draft.pin` once full.
    pub new_pin: PinBuffer,
    /// Set by the first Escape over unsaved edits.
    pub confirm_discard: bool,
}

impl SecurityPanel {
    pub fn open(current: LockConfiguration) -> Self {
        Self {
            saved: current.clone(),
            draft: current,
            focused: SettingId::LockEnabled,
            new_pin: PinBuffer::default(),
            confirm_discard: false,
        }
    }

    /// Unsaved edits exist. Turning a toggle back counts as clean.
    pub fn is_dirty(&self) -> bool {
        self.draft != self.saved || !self.new_pin.is_empty()
    }

    pub fn is_editable(&self, id: SettingId) -> bool {
        id.is_editable(&self.draft)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingsDialogState {
    #[default]
    Hidden,
    Visible(SecurityPanel),
}

impl UiState for SettingsDialogState {}

impl SettingsDialogState {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn panel(&self) -> Option<&SecurityPanel> {
        match self {
            Self::Visible(panel) => Some(panel),
            Self::Hidden => None,
        }
    }
}
