use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SETTINGS_FILE;
use crate::difficulty::Profile;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Profile,
    pub sound: bool,
    /// Synthesize cues whose sound file is missing.
    pub synth_sounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Profile::Medium,
            sound: true,
            synth_sounds: false,
        }
    }
}

impl Settings {
    pub fn load(storage: &Storage) -> Self {
        match storage.load_json::<Settings>(SETTINGS_FILE) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(err) => {
                warn!(error = %err, "settings unreadable, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, storage: &Storage) {
        match storage.save_json(SETTINGS_FILE, self) {
            Ok(()) => debug!(settings = ?self, "settings saved"),
            Err(err) => warn!(error = %err, "settings not saved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"difficulty": "hard"}"#).unwrap();
        assert_eq!(settings.difficulty, Profile::Hard);
        assert!(settings.sound);
        assert!(!settings.synth_sounds);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"difficulty": "easy", "sound": false, "volume": 3}"#).unwrap();
        assert_eq!(settings.difficulty, Profile::Easy);
        assert!(!settings.sound);
    }

    #[test]
    fn round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        let settings = Settings {
            difficulty: Profile::Easy,
            sound: false,
            synth_sounds: true,
        };
        settings.save(&storage);
        assert_eq!(Settings::load(&storage), settings);
    }

    #[test]
    fn bad_difficulty_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::new(dir.path());
        storage
            .save_text(SETTINGS_FILE, r#"{"difficulty": "nightmare"}"#)
            .unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }
}
