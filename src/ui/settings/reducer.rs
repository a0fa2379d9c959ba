use crate::config::SettingId;
use crate::lock::Pin;
use crate::ui::mvi::Reducer;
use crate::ui::settings::intent::SettingsIntent;
use crate::ui::settings::state::{SecurityPanel, SettingsDialogState};

/// Edits a draft of the lock settings; nothing is persisted until the app
/// saves it.
///
/// Rows that the rest of the draft makes meaningless are skipped by focus
/// movement and ignore edits.
pub struct SettingsReducer;

impl Reducer for SettingsReducer {
    type State = SettingsDialogState;
    type Intent = SettingsIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match (state, intent) {
            (_, SettingsIntent::Open { current }) => {
                SettingsDialogState::Visible(SecurityPanel::open(current))
            }
            (_, SettingsIntent::Close) | (SettingsDialogState::Hidden, _) => {
                SettingsDialogState::Hidden
            }
            (SettingsDialogState::Visible(panel), SettingsIntent::RequestClose) => {
                if panel.is_dirty() && !panel.confirm_discard {
                    SettingsDialogState::Visible(SecurityPanel {
                        confirm_discard: true,
                        ..panel
                    })
                } else {
                    SettingsDialogState::Hidden
                }
            }
            (SettingsDialogState::Visible(panel), intent) => {
                SettingsDialogState::Visible(edit(panel, intent))
            }
        }
    }
}

fn edit(mut panel: SecurityPanel, intent: SettingsIntent) -> SecurityPanel {
    panel.confirm_discard = false;
    let focused = panel.focused;
    let editable = panel.is_editable(focused);

    match intent {
        SettingsIntent::FocusPrevious => panel.focused = step_focus(&panel, false),
        SettingsIntent::FocusNext => panel.focused = step_focus(&panel, true),
        SettingsIntent::Activate if editable => match focused {
            SettingId::LockEnabled => panel.draft.enabled = !panel.draft.enabled,
            SettingId::LockOnBackground => {
                panel.draft.lock_on_background = !panel.draft.lock_on_background
            }
            SettingId::Method => panel.draft.method = panel.draft.method.next(),
            SettingId::Pin => {}
        },
        SettingsIntent::MethodNext if editable && focused == SettingId::Method => {
            panel.draft.method = panel.draft.method.next();
        }
        SettingsIntent::MethodPrevious if editable && focused == SettingId::Method => {
            panel.draft.method = panel.draft.method.previous();
        }
        SettingsIntent::PinDigit(digit) if editable && focused == SettingId::Pin => {
            panel.new_pin.push(digit);
            if let Some(pin) = Pin::from_entry(&panel.new_pin) {
                panel.draft.pin = pin;
                panel.new_pin.clear();
            }
        }
        SettingsIntent::PinBackspace if editable && focused == SettingId::Pin => {
            panel.new_pin.pop();
        }
        _ => {}
    }

    // Half-typed digits never outlive the PIN row being usable.
    if !panel.is_editable(SettingId::Pin) {
        panel.new_pin.clear();
    }
    if !panel.is_editable(panel.focused) {
        panel.focused = SettingId::LockEnabled;
    }
    panel
}

/// Next editable row in display order, wrapping. "Lock app" is always
/// editable, so this always lands somewhere.
fn step_focus(panel: &SecurityPanel, forward: bool) -> SettingId {
    let rows = SettingId::all();
    let len = rows.len();
    let start = rows.iter().position(|id| *id == panel.focused).unwrap_or(0);
    (1..=len)
        .map(|offset| {
            if forward {
                rows[(start + offset) % len]
            } else {
                rows[(start + len - offset) % len]
            }
        })
        .find(|id| panel.is_editable(*id))
        .unwrap_or(SettingId::LockEnabled)
}
