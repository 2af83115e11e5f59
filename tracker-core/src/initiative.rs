//! Turn order derived from the roster.

use crate::character::{CharacterId, CharacterKind};
use crate::roster::Roster;

/// One row of the initiative list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnEntry {
    /// Removal is keyed on this, looked up when the control is used.
    pub id: CharacterId,
    pub name: String,
    pub initiative: i32,
    pub kind: CharacterKind,
}

impl TurnEntry {
    /// Row label, e.g. `"Aria (17)"`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.initiative)
    }
}

/// Sort the roster by initiative (stable, highest first) and list it.
pub fn build_turn_order(roster: &mut Roster) -> Vec<TurnEntry> {
    roster.sort_by_initiative();
    roster
        .iter()
        .map(|c| TurnEntry {
            id: c.id,
            name: c.name.clone(),
            initiative: c.initiative,
            kind: c.kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;

    #[test]
    fn test_turn_order_labels() {
        let mut roster = Roster::new();
        roster
            .add_character(Character::player("Aria", 30).with_initiative(12))
            .unwrap();
        roster
            .add_character(Character::monster("Goblin", 7).with_initiative(17))
            .unwrap();

        let order = build_turn_order(&mut roster);
        let labels: Vec<_> = order.iter().map(TurnEntry::label).collect();
        assert_eq!(labels, ["Goblin (17)", "Aria (12)"]);
        assert_eq!(roster.characters()[0].name, "Goblin");
    }

    #[test]
    fn test_equal_initiative_keeps_insertion_order() {
        let mut roster = Roster::new();
        for name in ["A", "B", "C"] {
            roster.add_character(Character::player(name, 5)).unwrap();
        }
        for _ in 0..3 {
            let order = build_turn_order(&mut roster);
            let names: Vec<_> = order.iter().map(|e| e.name.as_str()).collect();
            assert_eq!(names, ["A", "B", "C"]);
        }
    }
}
