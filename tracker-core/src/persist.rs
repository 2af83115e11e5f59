//! Party persistence in a single key/value slot.
//!
//! Only players are saved. The slot holds a JSON array in the shape
//! `{name, maxHp, currentHp, initiative, isMonster}`. Loading is forgiving:
//! a missing or unreadable slot is the same as no saved party.

use crate::character::{Character, CharacterId, CharacterKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Default slot name for the saved party.
pub const DEFAULT_SLOT_KEY: &str = "savedParty";

/// A string-valued key/value store, like a browser's local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

/// In-process store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a JSON object file mapping keys to string values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        // A corrupt file is replaced rather than blocking every save.
        let mut entries = self.read_all().unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "discarding unreadable store file");
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Wire shape of one saved character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCharacter {
    pub name: String,
    pub max_hp: i32,
    pub current_hp: i32,
    #[serde(default)]
    pub initiative: i32,
    #[serde(default)]
    pub is_monster: bool,
}

impl From<&Character> for SavedCharacter {
    fn from(c: &Character) -> Self {
        Self {
            name: c.name.clone(),
            max_hp: c.max_hp,
            current_hp: c.current_hp,
            initiative: c.initiative,
            is_monster: c.is_monster(),
        }
    }
}

impl SavedCharacter {
    /// Whether this entry can become a live character.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.max_hp > 0
    }
}

impl From<SavedCharacter> for Character {
    /// Ids are not persisted, so a loaded character gets a fresh one.
    fn from(s: SavedCharacter) -> Self {
        Self {
            id: CharacterId::new(),
            name: s.name.trim().to_string(),
            max_hp: s.max_hp,
            current_hp: s.current_hp.max(0),
            initiative: s.initiative,
            kind: if s.is_monster {
                CharacterKind::Monster
            } else {
                CharacterKind::Player
            },
        }
    }
}

/// Reads and writes the saved party in one named slot of a store.
#[derive(Debug, Clone)]
pub struct PartyGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PartyGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_SLOT_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Overwrite the slot with the given characters.
    pub fn save<'a>(
        &mut self,
        players: impl IntoIterator<Item = &'a Character>,
    ) -> Result<usize, PersistError> {
        let saved: Vec<SavedCharacter> = players.into_iter().map(SavedCharacter::from).collect();
        let json = serde_json::to_string(&saved)?;
        self.store.set(&self.key, &json)?;
        info!(key = %self.key, count = saved.len(), "party saved");
        Ok(saved.len())
    }

    /// Read the slot. Missing, unreadable or malformed data reads as empty.
    ///
    /// Entries with a blank name or a non-positive maximum are dropped.
    pub fn load(&self) -> Vec<Character> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no saved party");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read saved party");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<SavedCharacter>>(&raw) {
            Ok(saved) => saved
                .into_iter()
                .filter(|entry| {
                    let valid = entry.is_valid();
                    if !valid {
                        warn!(
                            key = %self.key,
                            name = %entry.name,
                            max_hp = entry.max_hp,
                            "skipping invalid saved character"
                        );
                    }
                    valid
                })
                .map(Character::from)
                .collect(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved party is malformed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let c = Character::player("Aria", 30).with_initiative(3);
        let json = serde_json::to_value(SavedCharacter::from(&c)).unwrap();
        assert_eq!(json["name"], "Aria");
        assert_eq!(json["maxHp"], 30);
        assert_eq!(json["currentHp"], 30);
        assert_eq!(json["initiative"], 3);
        assert_eq!(json["isMonster"], false);
    }

    #[test]
    fn test_load_missing_slot_is_empty() {
        let gateway = PartyGateway::new(MemoryStore::new());
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn test_load_malformed_slot_is_empty() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_SLOT_KEY, "{not json").unwrap();
        let gateway = PartyGateway::new(store);
        assert!(gateway.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_and_loads_back() {
        let mut gateway = PartyGateway::new(MemoryStore::new());
        let first = [Character::player("Old", 5)];
        gateway.save(&first).unwrap();

        let mut aria = Character::player("Aria", 30).with_initiative(7);
        aria.adjust_hp(-4);
        gateway.save([&aria]).unwrap();

        let loaded = gateway.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Aria");
        assert_eq!(loaded[0].current_hp, 26);
        assert_eq!(loaded[0].initiative, 7);
        assert_ne!(loaded[0].id, aria.id);
    }

    #[test]
    fn test_load_reads_camel_case_slot_text() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_SLOT_KEY,
                r#"[{"name":"Bram","maxHp":22,"currentHp":9,"initiative":0,"isMonster":false}]"#,
            )
            .unwrap();
        let loaded = PartyGateway::new(store).load();
        assert_eq!(loaded[0].name, "Bram");
        assert_eq!(loaded[0].current_hp, 9);
        assert!(!loaded[0].is_monster());
    }

    #[test]
    fn test_load_drops_entries_without_positive_max() {
        let mut store = MemoryStore::new();
        store
            .set(
                DEFAULT_SLOT_KEY,
                r#"[{"name":"Ghost","maxHp":-5,"currentHp":3},
                    {"name":"Zero","maxHp":0,"currentHp":0},
                    {"name":"  ","maxHp":10,"currentHp":10},
                    {"name":"Bram","maxHp":22,"currentHp":9}]"#,
            )
            .unwrap();
        let loaded = PartyGateway::new(store).load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "Bram");
    }

    #[test]
    fn test_custom_slot_key() {
        let mut gateway = PartyGateway::with_key(MemoryStore::new(), "otherParty");
        gateway.save(&[Character::player("Aria", 30)]).unwrap();
        assert!(gateway.store().get(DEFAULT_SLOT_KEY).unwrap().is_none());
        assert!(gateway.store().get("otherParty").unwrap().is_some());
    }
}
