use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

use crate::log_warn;

const ENABLE_LOGS: bool = true;

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserSettings {
    pub currency_symbol: String,
    pub database_file: PathBuf,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "R".into(),
            database_file: PathBuf::from("claims.db"),
        }
    }
}

/// JSON-backed settings kept next to the claims database.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log_warn!("Ignoring unreadable settings in {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(SETTINGS_FILE))
    }

    pub fn snapshot(&self) -> UserSettings {
        match self.data.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn currency_symbol(&self) -> String {
        self.snapshot().currency_symbol
    }

    /// Database location, resolved against `data_dir` when relative.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        let file = self.snapshot().database_file;
        if file.is_absolute() {
            file
        } else {
            data_dir.join(file)
        }
    }

    pub fn update_currency_symbol(&self, symbol: &str) -> Result<()> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            bail!("currency symbol must not be empty");
        }

        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        guard.currency_symbol = symbol.to_string();
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path()).unwrap();

        assert_eq!(store.snapshot(), UserSettings::default());
        assert_eq!(store.database_path(dir.path()), dir.path().join("claims.db"));
    }

    #[test]
    fn currency_update_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path()).unwrap();
        store.update_currency_symbol(" $ ").unwrap();

        let reloaded = SettingsStore::in_dir(dir.path()).unwrap();
        assert_eq!(reloaded.currency_symbol(), "$");
    }

    #[test]
    fn blank_currency_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::in_dir(dir.path()).unwrap();

        assert!(store.update_currency_symbol("  ").is_err());
        assert_eq!(store.currency_symbol(), "R");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "{ not json").unwrap();

        let store = SettingsStore::in_dir(dir.path()).unwrap();
        assert_eq!(store.snapshot(), UserSettings::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{ "database_file": "/var/lib/claims.db" }"#,
        )
        .unwrap();

        let store = SettingsStore::in_dir(dir.path()).unwrap();
        assert_eq!(store.currency_symbol(), "R");
        assert_eq!(
            store.database_path(dir.path()),
            PathBuf::from("/var/lib/claims.db")
        );
    }
}
