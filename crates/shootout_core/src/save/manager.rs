use tracing::{info, warn};

use super::error::SettingsError;
use super::settings::GameSettings;
use super::store::SettingsStore;
use super::SETTINGS_KEY;

/// Loads and saves [`GameSettings`] through a [`SettingsStore`].
///
/// Reads never fail: a corrupted blob is logged, removed and replaced by
/// defaults. A transient read error falls back to defaults but leaves the
/// stored blob alone.
#[derive(Debug, Clone)]
pub struct SettingsManager<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> SettingsManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&mut self) -> GameSettings {
        match self.store.read_raw(SETTINGS_KEY) {
            Ok(None) => GameSettings::default(),
            Ok(Some(raw)) if raw.trim().is_empty() => GameSettings::default(),
            Ok(Some(raw)) => match GameSettings::from_json_lenient(&raw) {
                Some(settings) => settings,
                None => {
                    warn!("Invalid settings format, clearing stored settings");
                    self.discard();
                    GameSettings::default()
                }
            },
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "Settings read failed, using defaults");
                GameSettings::default()
            }
            Err(err) => {
                warn!(error = %err, "Settings unreadable, clearing stored settings");
                self.discard();
                GameSettings::default()
            }
        }
    }

    pub fn save(&mut self, settings: &GameSettings) -> Result<(), SettingsError> {
        let json = settings.to_json()?;
        self.store.write_raw(SETTINGS_KEY, &json)?;
        info!(
            sound = settings.sound_enabled,
            vibration = settings.vibration_enabled,
            difficulty = settings.difficulty.as_str(),
            "settings saved"
        );
        Ok(())
    }

    /// Read-modify-write; returns the stored settings.
    pub fn update<F>(&mut self, f: F) -> Result<GameSettings, SettingsError>
    where
        F: FnOnce(&mut GameSettings),
    {
        let mut settings = self.load();
        f(&mut settings);
        self.save(&settings)?;
        Ok(settings)
    }

    fn discard(&mut self) {
        if let Err(err) = self.store.remove(SETTINGS_KEY) {
            warn!(error = %err, "Could not clear corrupted settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::keeper::Difficulty;
    use crate::save::settings::ViewMode;
    use crate::save::store::{FileStore, MemoryStore};
    use tempfile::TempDir;

    /// Store whose reads always fail with the given error
    struct BrokenStore {
        fail: fn() -> SettingsError,
        removed: bool,
    }

    impl BrokenStore {
        fn io() -> Self {
            Self { fail: || std::io::Error::other("disk on fire").into(), removed: false }
        }

        fn bad_key() -> Self {
            Self {
                fail: || SettingsError::InvalidKey { key: SETTINGS_KEY.to_string() },
                removed: false,
            }
        }
    }

    impl SettingsStore for BrokenStore {
        fn read_raw(&self, _key: &str) -> Result<Option<String>, SettingsError> {
            Err((self.fail)())
        }
        fn write_raw(&mut self, _key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(std::io::Error::other("disk on fire").into())
        }
        fn remove(&mut self, _key: &str) -> Result<(), SettingsError> {
            self.removed = true;
            Ok(())
        }
    }

    #[test]
    fn test_missing_settings_are_defaults() {
        let mut manager = SettingsManager::new(MemoryStore::new());
        assert_eq!(manager.load(), GameSettings::default());
    }

    #[test]
    fn test_corrupted_settings_are_discarded() {
        let store = MemoryStore::with_entry(SETTINGS_KEY, "[\"not\", \"an object\"]");
        let mut manager = SettingsManager::new(store);
        assert_eq!(manager.load(), GameSettings::default());
        assert!(!manager.store().contains(SETTINGS_KEY));
    }

    #[test]
    fn test_io_failure_keeps_stored_settings() {
        let mut manager = SettingsManager::new(BrokenStore::io());
        assert_eq!(manager.load(), GameSettings::default());
        assert!(!manager.store().removed);
        assert!(manager.save(&GameSettings::default()).is_err());
    }

    #[test]
    fn test_unrecoverable_read_failure_clears_settings() {
        let mut manager = SettingsManager::new(BrokenStore::bad_key());
        assert_eq!(manager.load(), GameSettings::default());
        assert!(manager.store().removed);
    }

    #[test]
    fn test_update_persists() {
        let mut manager = SettingsManager::new(MemoryStore::new());
        let updated = manager
            .update(|s| {
                s.difficulty = Difficulty::Hard;
                s.sound_enabled = false;
            })
            .unwrap();
        assert_eq!(updated.difficulty, Difficulty::Hard);
        assert_eq!(manager.load(), updated);
    }

    #[test]
    fn test_file_backed_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(FileStore::new(temp_dir.path()));
        let settings = GameSettings { view_mode: ViewMode::Night, ..Default::default() };
        manager.save(&settings).unwrap();

        let mut reopened = SettingsManager::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.load(), settings);
    }

    #[test]
    fn test_file_with_garbage_is_cleared() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let path = store.path_for(SETTINGS_KEY).unwrap();
        std::fs::write(&path, "{{{{").unwrap();

        let mut manager = SettingsManager::new(store);
        assert_eq!(manager.load(), GameSettings::default());
        assert!(!path.exists());
    }
}
