//! Characters and their hit-point bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for characters.
///
/// Generated on creation and never shown to the user; the display name is
/// only an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a character belongs to the party or the opposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Player,
    Monster,
}

impl CharacterKind {
    pub fn is_monster(self) -> bool {
        matches!(self, CharacterKind::Monster)
    }

    /// Placeholder shown in the name field of a draft card.
    pub fn name_placeholder(self) -> &'static str {
        match self {
            CharacterKind::Player => "Player Name",
            CharacterKind::Monster => "Monster Name",
        }
    }
}

impl fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterKind::Player => write!(f, "Player"),
            CharacterKind::Monster => write!(f, "Monster"),
        }
    }
}

/// A combatant on the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub max_hp: i32,
    /// Never negative. May sit above `max_hp` while temporary HP is active.
    pub current_hp: i32,
    pub initiative: i32,
    pub kind: CharacterKind,
}

impl Character {
    /// Create a character at full health with no initiative.
    pub fn new(name: impl Into<String>, max_hp: i32, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            initiative: 0,
            kind,
        }
    }

    pub fn player(name: impl Into<String>, max_hp: i32) -> Self {
        Self::new(name, max_hp, CharacterKind::Player)
    }

    pub fn monster(name: impl Into<String>, max_hp: i32) -> Self {
        Self::new(name, max_hp, CharacterKind::Monster)
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    pub fn is_monster(&self) -> bool {
        self.kind.is_monster()
    }

    /// Apply damage (negative delta) or healing (positive delta).
    ///
    /// The result is clamped to `0..=max_hp`, which also discards any
    /// temporary HP sitting above the maximum.
    pub fn adjust_hp(&mut self, delta: i32) -> i32 {
        self.current_hp = self.current_hp.saturating_add(delta).clamp(0, self.max_hp.max(0));
        self.current_hp
    }

    pub fn restore_to_max(&mut self) {
        self.current_hp = self.max_hp;
    }

    /// Add temporary HP on top of current HP. The maximum is not enforced.
    ///
    /// Returns false (and changes nothing) for non-positive amounts.
    pub fn add_temporary_hp(&mut self, amount: i32) -> bool {
        if amount <= 0 {
            return false;
        }
        self.current_hp = self.current_hp.saturating_add(amount);
        true
    }

    /// Change the maximum. With `rebase_current` the character is healed to
    /// the new maximum, otherwise current HP only drops if it now exceeds it.
    pub fn set_max_hp(&mut self, new_max: i32, rebase_current: bool) {
        self.max_hp = new_max;
        if rebase_current {
            self.current_hp = new_max;
        } else {
            self.current_hp = self.current_hp.min(new_max);
        }
    }

    /// Fraction of maximum HP remaining, for health bars. Capped at 1.0.
    pub fn hp_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.current_hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }

    /// Amount of HP currently held above the maximum.
    pub fn excess_hp(&self) -> i32 {
        (self.current_hp - self.max_hp).max(0)
    }

    /// The `current/max` readout shown on a health card.
    pub fn hp_label(&self) -> String {
        format!("HP: {}/{}", self.current_hp, self.max_hp)
    }
}
