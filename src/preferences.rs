//! Persisted preference slots and the host "prefers dark" signal.
//!
//! The store is a flat string-keyed map. The theme controller only uses the
//! `theme` key; absence means the user never chose.

use crate::error::PreferenceError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Durable key-value slots surviving restarts.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        (**self).set(key, value)
    }
}

/// In-process store, used by tests and the `--ephemeral` CLI mode.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    slots: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value.
    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.slots().insert(key.to_string(), value.to_string());
        store
    }

    fn slots(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A panicked writer leaves the map itself intact.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        Ok(self.slots().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        self.slots().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML-file store (`theme = "dark"`), one top-level key per slot.
///
/// Writes keep unrelated keys in the file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/jobsnvisa/preferences.toml`, when a config root exists.
    pub fn default_location() -> Option<Self> {
        default_preferences_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<toml::Table, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => Ok(text.parse::<toml::Table>()?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(toml::Table::new()),
            Err(e) => Err(PreferenceError::Io(e)),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, PreferenceError> {
        let table = self.read_table()?;
        // Non-string values are still a saved choice; callers validate them.
        Ok(table.get(key).map(|value| match value {
            toml::Value::String(text) => text.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut table = self.read_table()?;
        table.insert(key.to_string(), toml::Value::String(value.to_string()));
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, toml::to_string(&table)?)?;
        Ok(())
    }
}

/// Return the default preference file path.
pub fn default_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("jobsnvisa").join("preferences.toml"))
}

// ---------------------------------------------------------------------------
// System preference
// ---------------------------------------------------------------------------

/// Read-only host signal: does the environment prefer a dark scheme?
pub trait SystemPreference {
    fn prefers_dark(&self) -> bool;
}

/// Fixed answer, from configuration or a CLI flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSystemPreference(pub bool);

impl SystemPreference for StaticSystemPreference {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Terminal heuristic based on `COLORFGBG` (`"<fg>;<bg>"`).
///
/// Background colors 0-6 and 8 are dark palette entries; anything else, or a
/// missing variable, reads as light.
#[derive(Debug, Clone)]
pub struct EnvSystemPreference {
    colorfgbg: Option<String>,
}

impl EnvSystemPreference {
    pub fn from_env() -> Self {
        Self {
            colorfgbg: std::env::var("COLORFGBG").ok(),
        }
    }

    pub fn from_value(value: Option<&str>) -> Self {
        Self {
            colorfgbg: value.map(str::to_string),
        }
    }
}

impl SystemPreference for EnvSystemPreference {
    fn prefers_dark(&self) -> bool {
        let Some(raw) = self.colorfgbg.as_deref() else {
            return false;
        };
        let Some(bg) = raw.rsplit(';').next() else {
            return false;
        };
        matches!(bg.trim().parse::<u8>(), Ok(0..=6 | 8))
    }
}
