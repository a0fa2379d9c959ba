//! Lock settings panel.

mod intent;
mod reducer;
mod state;

pub use intent::SettingsIntent;
pub use reducer::SettingsReducer;
pub use state::{SecurityPanel, SettingsDialogState};
