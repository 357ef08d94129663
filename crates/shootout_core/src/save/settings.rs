use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::keeper::Difficulty;

/// Stadium look
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Day,
    Night,
    Rain,
}

impl ViewMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day" => Some(ViewMode::Day),
            "night" => Some(ViewMode::Night),
            "rain" => Some(ViewMode::Rain),
            _ => None,
        }
    }
}

/// Player preferences, stored as one JSON object
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub difficulty: Difficulty,
    pub view_mode: ViewMode,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            vibration_enabled: true,
            difficulty: Difficulty::Medium,
            view_mode: ViewMode::Day,
        }
    }
}

impl GameSettings {
    /// Parse a stored blob.
    ///
    /// Returns `None` for anything that is not a JSON object (blank, arrays,
    /// scalars, broken syntax). Inside an object, each field that is missing
    /// or has the wrong type/value keeps its default.
    pub fn from_json_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            return None;
        }

        match serde_json::from_str::<Value>(trimmed).ok()? {
            Value::Object(map) => Some(Self::from_object(&map)),
            _ => None,
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| map.get(key).and_then(Value::as_bool).unwrap_or(default);
        let text = |key: &str| map.get(key).and_then(Value::as_str);

        Self {
            sound_enabled: flag("soundEnabled", defaults.sound_enabled),
            vibration_enabled: flag("vibrationEnabled", defaults.vibration_enabled),
            difficulty: text("difficulty")
                .and_then(|s| match s {
                    "easy" | "medium" | "hard" => Difficulty::parse(s),
                    _ => None,
                })
                .unwrap_or(defaults.difficulty),
            view_mode: text("viewMode").and_then(ViewMode::parse).unwrap_or(defaults.view_mode),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = GameSettings::default();
        assert!(s.sound_enabled);
        assert!(s.vibration_enabled);
        assert_eq!(s.difficulty, Difficulty::Medium);
        assert_eq!(s.view_mode, ViewMode::Day);
    }

    #[test]
    fn test_json_shape() {
        let json = GameSettings::default().to_json().unwrap();
        assert_eq!(
            json,
            r#"{"soundEnabled":true,"vibrationEnabled":true,"difficulty":"medium","viewMode":"day"}"#
        );
    }

    #[test]
    fn test_full_object_parses() {
        let raw = r#" {"soundEnabled":false,"vibrationEnabled":false,"difficulty":"hard","viewMode":"rain"} "#;
        let s = GameSettings::from_json_lenient(raw).unwrap();
        assert!(!s.sound_enabled);
        assert!(!s.vibration_enabled);
        assert_eq!(s.difficulty, Difficulty::Hard);
        assert_eq!(s.view_mode, ViewMode::Rain);
    }

    #[test]
    fn test_bad_fields_fall_back_individually() {
        let raw = r#"{"soundEnabled":"yes","difficulty":"HARD","viewMode":"night","extra":1}"#;
        let s = GameSettings::from_json_lenient(raw).unwrap();
        assert!(s.sound_enabled);
        assert_eq!(s.difficulty, Difficulty::Medium);
        assert_eq!(s.view_mode, ViewMode::Night);
    }

    #[test]
    fn test_non_objects_are_discarded() {
        for raw in ["", "   ", "[1,2]", "\"day\"", "42", "null", "{broken", "{\"a\":}", "{}x"] {
            assert_eq!(GameSettings::from_json_lenient(raw), None, "raw = {raw:?}");
        }
    }

    #[test]
    fn test_empty_object_is_defaults() {
        assert_eq!(GameSettings::from_json_lenient("{}"), Some(GameSettings::default()));
    }
}
