//! Persisted user settings.
//!
//! One JSON file holding the user's preferences; today that is the
//! single `maxRecords` limit. The file is read once at construction
//! and rewritten on every change. Load failures fall back to defaults:
//! an absent file is the normal first-run case, a corrupt or unreadable
//! file is logged as a warning so the two cases stay distinguishable.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Maximum-records limit applied when no stored value exists.
pub const DEFAULT_MAX_RECORDS: u32 = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    #[serde(rename = "maxRecords")]
    max_records: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

/// File-backed settings store.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Load settings from `path`, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn new(path: PathBuf) -> Self {
        let data = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(contents) => match serde_json::from_str::<UserSettings>(&contents) {
                    Ok(settings) => settings,
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "settings file is corrupt, using defaults"
                        );
                        UserSettings::default()
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to read settings file, using defaults"
                    );
                    UserSettings::default()
                }
            }
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            UserSettings::default()
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    /// Current maximum-records limit.
    pub fn max_records(&self) -> u32 {
        self.data.read().max_records
    }

    /// Update the limit and rewrite the settings file.
    ///
    /// The in-memory value is updated even when the write fails; the
    /// error is returned so the caller can log it.
    pub fn set_max_records(&self, limit: u32) -> std::io::Result<()> {
        let serialized = {
            let mut guard = self.data.write();
            guard.max_records = limit;
            serde_json::to_string(&*guard).map_err(std::io::Error::other)?
        };
        fs::write(&self.path, serialized)
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}
