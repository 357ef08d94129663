use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {key:?}")]
    InvalidKey { key: String },
}

impl SettingsError {
    /// Whether retrying the same operation may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            SettingsError::Io(_) => true,
            SettingsError::Serialization(_) => false,
            SettingsError::InvalidKey { .. } => false,
        }
    }
}
