mod loader;
mod settings;
mod store;
mod types;

pub use loader::ConfigError;
pub use settings::{save_lock_settings, SettingId};
pub use store::{ConfigStore, PinStore};
pub use types::{BiometricConfig, Config, LoggingConfig, ProfileConfig};
