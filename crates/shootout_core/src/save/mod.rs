// Persisted player settings
// JSON blob under a single key, read leniently: corrupted data falls back to defaults.

pub mod error;
pub mod manager;
pub mod settings;
pub mod store;

pub use error::SettingsError;
pub use manager::SettingsManager;
pub use settings::{GameSettings, ViewMode};
pub use store::{FileStore, MemoryStore, SettingsStore};

/// Storage key of the settings blob
pub const SETTINGS_KEY: &str = "gameSettings";
