//! Tracker configuration.

use crate::persist::DEFAULT_SLOT_KEY;
use std::path::PathBuf;

/// Default file backing the key/value store.
pub const DEFAULT_SAVE_FILE: &str = "tracker-storage.json";

/// Default log file for the terminal UI.
pub const DEFAULT_LOG_FILE: &str = "tracker.log";

/// Configuration for a tracker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// File backing the key/value store.
    pub save_file: PathBuf,

    /// Slot name the party is saved under.
    pub slot_key: String,

    /// Where the terminal UI writes its logs.
    pub log_file: PathBuf,

    /// Suggested answer when asking for a monster's initiative.
    pub monster_initiative_hint: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerConfig {
    /// Create a config with the built-in defaults.
    pub fn new() -> Self {
        Self {
            save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            monster_initiative_hint: "10".to_string(),
        }
    }

    /// Defaults overridden by `TRACKER_SAVE_FILE`, `TRACKER_SLOT_KEY` and
    /// `TRACKER_LOG_FILE` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        if let Some(path) = lookup("TRACKER_SAVE_FILE").filter(|v| !v.is_empty()) {
            config.save_file = PathBuf::from(path);
        }
        if let Some(key) = lookup("TRACKER_SLOT_KEY").filter(|v| !v.is_empty()) {
            config.slot_key = key;
        }
        if let Some(path) = lookup("TRACKER_LOG_FILE").filter(|v| !v.is_empty()) {
            config.log_file = PathBuf::from(path);
        }
        config
    }

    /// Set the store file.
    pub fn with_save_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_file = path.into();
        self
    }

    /// Set the slot key.
    pub fn with_slot_key(mut self, key: impl Into<String>) -> Self {
        self.slot_key = key.into();
        self
    }

    /// Set the log file.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = path.into();
        self
    }

    /// Set the suggested monster initiative.
    pub fn with_monster_initiative_hint(mut self, hint: impl Into<String>) -> Self {
        self.monster_initiative_hint = hint.into();
        self
    }
}
