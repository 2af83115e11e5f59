//! The roster store: the canonical, ordered list of characters.
//!
//! Every change to a character goes through here. The store knows nothing
//! about rendering; the controller re-renders after each mutation.

use crate::character::{Character, CharacterId};
use crate::error::TrackerError;
use tracing::debug;

/// Ordered collection of characters, unique by exact (case-sensitive) name.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Characters in their current order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Non-monster characters, in roster order.
    pub fn players(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|c| !c.is_monster())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Add a character, rejecting a name that is already taken.
    pub fn add_character(&mut self, character: Character) -> Result<CharacterId, TrackerError> {
        if self.contains_name(&character.name) {
            return Err(TrackerError::DuplicateName(character.name));
        }
        let id = character.id;
        debug!(name = %character.name, max_hp = character.max_hp, kind = %character.kind, "character added");
        self.characters.push(character);
        Ok(id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name == name)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Position of a character in the current order.
    pub fn position(&self, id: CharacterId) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    fn find_mut(&mut self, name: &str) -> Result<&mut Character, TrackerError> {
        self.characters
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| TrackerError::NotFound(name.to_string()))
    }

    /// Overwrite a character's initiative. Any value is accepted.
    pub fn update_initiative(&mut self, name: &str, value: i32) -> Result<(), TrackerError> {
        let character = self.find_mut(name)?;
        character.initiative = value;
        debug!(name, initiative = value, "initiative updated");
        Ok(())
    }

    /// Remove the character at a position in the current order.
    ///
    /// The index is only meaningful against the order it was read from;
    /// after any re-sort it may name a different character.
    pub fn remove_by_index(&mut self, index: usize) -> Option<Character> {
        if index >= self.characters.len() {
            return None;
        }
        let removed = self.characters.remove(index);
        debug!(name = %removed.name, index, "character removed by position");
        Some(removed)
    }

    /// Remove a character by identity.
    pub fn remove(&mut self, id: CharacterId) -> Option<Character> {
        let index = self.position(id)?;
        let removed = self.characters.remove(index);
        debug!(name = %removed.name, "character removed");
        Some(removed)
    }

    /// Apply a signed HP change clamped to `0..=max_hp`. Returns the new HP.
    pub fn adjust_hp(&mut self, name: &str, delta: i32) -> Result<i32, TrackerError> {
        let character = self.find_mut(name)?;
        let hp = character.adjust_hp(delta);
        debug!(name, delta, hp, "hp adjusted");
        Ok(hp)
    }

    pub fn set_hp_to_max(&mut self, name: &str) -> Result<(), TrackerError> {
        let character = self.find_mut(name)?;
        character.restore_to_max();
        debug!(name, hp = character.current_hp, "hp restored to max");
        Ok(())
    }

    /// Add temporary HP, unclamped. Returns false when `amount <= 0` (no-op).
    pub fn add_temporary_hp(&mut self, name: &str, amount: i32) -> Result<bool, TrackerError> {
        let character = self.find_mut(name)?;
        let applied = character.add_temporary_hp(amount);
        if applied {
            debug!(name, amount, hp = character.current_hp, "temporary hp added");
        }
        Ok(applied)
    }

    pub fn set_max_hp(
        &mut self,
        name: &str,
        new_max: i32,
        rebase_current: bool,
    ) -> Result<(), TrackerError> {
        let character = self.find_mut(name)?;
        character.set_max_hp(new_max, rebase_current);
        debug!(name, new_max, rebase_current, hp = character.current_hp, "max hp changed");
        Ok(())
    }

    /// Stable sort by initiative, highest first. Ties keep their order.
    pub fn sort_by_initiative(&mut self) {
        self.characters.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    }

    pub fn clear(&mut self) {
        self.characters.clear();
    }
}
