//! Health cards: one visual unit per character.
//!
//! A card starts as a draft holding only a name and max-HP field. Submitting
//! a valid draft creates the backing character and turns the card active,
//! exposing the HP controls. Cards are bound to characters by id; the card
//! area is re-laid out from the roster after every mutation.
//!
//! This module holds card state and produces plain view models. Drawing
//! them is the front end's business.

use crate::character::{Character, CharacterId, CharacterKind};
use crate::error::{parse_int, TrackerError};
use crate::roster::Roster;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default text of the step-amount field on a fresh active card.
pub const DEFAULT_STEP: &str = "1";

/// Default text of the temporary-HP field on a fresh active card.
pub const DEFAULT_TEMP: &str = "0";

/// Unique identifier for cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub Uuid);

impl CardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardState {
    /// Waiting for a name and max HP.
    Draft { name: String, max_hp: String },
    /// Bound to a character on the roster.
    Active {
        character: CharacterId,
        step: String,
        temp: String,
        /// Set once an initiative has been assigned to the character.
        show_initiative: bool,
    },
}

/// Which text field of a card an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Name,
    MaxHp,
    Step,
    Temp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCard {
    pub id: CardId,
    pub kind: CharacterKind,
    pub state: CardState,
}

impl HealthCard {
    pub fn draft(kind: CharacterKind) -> Self {
        Self {
            id: CardId::new(),
            kind,
            state: CardState::Draft {
                name: String::new(),
                max_hp: String::new(),
            },
        }
    }

    pub fn active(kind: CharacterKind, character: CharacterId) -> Self {
        Self {
            id: CardId::new(),
            kind,
            state: CardState::Active {
                character,
                step: DEFAULT_STEP.to_string(),
                temp: DEFAULT_TEMP.to_string(),
                show_initiative: false,
            },
        }
    }

    pub fn is_draft(&self) -> bool {
        matches!(self.state, CardState::Draft { .. })
    }

    /// The bound character, if the card is active.
    pub fn character(&self) -> Option<CharacterId> {
        match self.state {
            CardState::Active { character, .. } => Some(character),
            CardState::Draft { .. } => None,
        }
    }

    /// Mutable access to one text field. `None` if the field does not exist
    /// in the card's current state.
    pub fn field_mut(&mut self, field: CardField) -> Option<&mut String> {
        match (&mut self.state, field) {
            (CardState::Draft { name, .. }, CardField::Name) => Some(name),
            (CardState::Draft { max_hp, .. }, CardField::MaxHp) => Some(max_hp),
            (CardState::Active { step, .. }, CardField::Step) => Some(step),
            (CardState::Active { temp, .. }, CardField::Temp) => Some(temp),
            _ => None,
        }
    }

    /// Replace the text of a field. Returns false if the field is absent.
    pub fn set_field(&mut self, field: CardField, text: impl Into<String>) -> bool {
        match self.field_mut(field) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Validate the draft fields and build the character they describe.
    pub fn parse_draft(&self, roster: &Roster) -> Result<Character, TrackerError> {
        let CardState::Draft { name, max_hp } = &self.state else {
            return Err(TrackerError::invalid("card is already active"));
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::invalid("a name is required"));
        }
        let max_hp = parse_int(max_hp)
            .filter(|hp| *hp > 0)
            .ok_or_else(|| TrackerError::invalid("max HP must be a number greater than 0"))?;
        if roster.contains_name(name) {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }

        Ok(Character::new(name, max_hp, self.kind))
    }

    /// Step amount for the damage/heal buttons. An empty field means 1.
    pub fn step_amount(&self) -> Result<i32, TrackerError> {
        let CardState::Active { step, .. } = &self.state else {
            return Err(TrackerError::invalid("card is not active"));
        };
        if step.trim().is_empty() {
            return Ok(1);
        }
        parse_int(step).ok_or_else(|| TrackerError::invalid(format!("step amount '{step}'")))
    }

    /// Temporary HP to apply. An empty field means 0; unparsable text is
    /// also treated as nothing to apply.
    pub fn temp_amount(&self) -> i32 {
        match &self.state {
            CardState::Active { temp, .. } if !temp.trim().is_empty() => {
                parse_int(temp).unwrap_or(0)
            }
            _ => 0,
        }
    }

    pub fn reveal_initiative(&mut self) {
        if let CardState::Active {
            show_initiative, ..
        } = &mut self.state
        {
            *show_initiative = true;
        }
    }
}

/// Render model for one card.
#[derive(Debug, Clone, PartialEq)]
pub enum CardView {
    Draft {
        id: CardId,
        kind: CharacterKind,
        name_placeholder: &'static str,
        name_input: String,
        max_hp_input: String,
    },
    Active {
        id: CardId,
        kind: CharacterKind,
        name: String,
        hp_label: String,
        current_hp: i32,
        max_hp: i32,
        hp_ratio: f32,
        initiative: Option<i32>,
        step_input: String,
        temp_input: String,
    },
}

impl CardView {
    pub fn id(&self) -> CardId {
        match self {
            CardView::Draft { id, .. } | CardView::Active { id, .. } => *id,
        }
    }

    pub fn kind(&self) -> CharacterKind {
        match self {
            CardView::Draft { kind, .. } | CardView::Active { kind, .. } => *kind,
        }
    }
}

/// The card area: every draft and active card, in display order.
#[derive(Debug, Clone, Default)]
pub struct HealthCards {
    cards: Vec<HealthCard>,
}

impl HealthCards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HealthCard> {
        self.cards.iter()
    }

    /// Card at a display position.
    pub fn at(&self, index: usize) -> Option<&HealthCard> {
        self.cards.get(index)
    }

    pub fn get(&self, id: CardId) -> Option<&HealthCard> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CardId) -> Option<&mut HealthCard> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    pub fn position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// The active card bound to a character.
    pub fn for_character_mut(&mut self, character: CharacterId) -> Option<&mut HealthCard> {
        self.cards
            .iter_mut()
            .find(|c| c.character() == Some(character))
    }

    /// Open a new draft card at the end of the area.
    pub fn open_draft(&mut self, kind: CharacterKind) -> CardId {
        let card = HealthCard::draft(kind);
        let id = card.id;
        self.cards.push(card);
        id
    }

    /// Append an active card for a character that already exists.
    pub fn attach(&mut self, kind: CharacterKind, character: CharacterId) -> CardId {
        let card = HealthCard::active(kind, character);
        let id = card.id;
        self.cards.push(card);
        id
    }

    /// Submit a draft: create its character and turn the card active.
    ///
    /// On any error the roster is untouched and the draft stays open.
    pub fn submit_draft(
        &mut self,
        id: CardId,
        roster: &mut Roster,
    ) -> Result<CharacterId, TrackerError> {
        let card = self
            .get_mut(id)
            .ok_or_else(|| TrackerError::invalid("no such card"))?;
        let character = card.parse_draft(roster)?;
        let kind = card.kind;
        let character_id = roster.add_character(character)?;
        *card = HealthCard {
            id,
            ..HealthCard::active(kind, character_id)
        };
        Ok(character_id)
    }

    /// Relocate active cards to follow the roster order.
    ///
    /// Cards whose character is gone are dropped. Characters without a card
    /// are simply absent. Drafts keep their relative order after all active
    /// cards.
    pub fn reorder(&mut self, roster: &Roster) {
        let mut cards = std::mem::take(&mut self.cards);
        let mut ordered = Vec::with_capacity(cards.len());

        for character in roster.iter() {
            if let Some(pos) = cards
                .iter()
                .position(|c| c.character() == Some(character.id))
            {
                ordered.push(cards.remove(pos));
            }
        }
        ordered.extend(cards.into_iter().filter(HealthCard::is_draft));

        self.cards = ordered;
    }

    /// Remove every card, draft or active.
    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Build render models for the whole card area.
    pub fn views(&self, roster: &Roster) -> Vec<CardView> {
        self.cards
            .iter()
            .filter_map(|card| match &card.state {
                CardState::Draft { name, max_hp } => Some(CardView::Draft {
                    id: card.id,
                    kind: card.kind,
                    name_placeholder: card.kind.name_placeholder(),
                    name_input: name.clone(),
                    max_hp_input: max_hp.clone(),
                }),
                CardState::Active {
                    character,
                    step,
                    temp,
                    show_initiative,
                } => {
                    let character = roster.get(*character)?;
                    Some(CardView::Active {
                        id: card.id,
                        kind: card.kind,
                        name: character.name.clone(),
                        hp_label: character.hp_label(),
                        current_hp: character.current_hp,
                        max_hp: character.max_hp,
                        hp_ratio: character.hp_ratio(),
                        initiative: show_initiative.then_some(character.initiative),
                        step_input: step.clone(),
                        temp_input: temp.clone(),
                    })
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_draft(cards: &mut HealthCards, kind: CharacterKind, name: &str, hp: &str) -> CardId {
        let id = cards.open_draft(kind);
        let card = cards.get_mut(id).unwrap();
        card.set_field(CardField::Name, name);
        card.set_field(CardField::MaxHp, hp);
        id
    }

    #[test]
    fn test_submit_draft_creates_character() {
        let mut roster = Roster::new();
        let mut cards = HealthCards::new();
        let card = filled_draft(&mut cards, CharacterKind::Player, "  Aria ", "30");

        let id = cards.submit_draft(card, &mut roster).unwrap();
        let aria = roster.get(id).unwrap();
        assert_eq!(aria.name, "Aria");
        assert_eq!(aria.current_hp, 30);
        assert_eq!(aria.max_hp, 30);
        assert_eq!(aria.initiative, 0);

        let card = cards.get(card).unwrap();
        assert_eq!(card.character(), Some(id));
        assert_eq!(card.step_amount().unwrap(), 1);
    }

    #[test]
    fn test_submit_draft_rejects_bad_input() {
        let mut roster = Roster::new();
        let mut cards = HealthCards::new();

        for (name, hp) in [("", "10"), ("   ", "10"), ("Orc", ""), ("Orc", "0"), ("Orc", "-5"), ("Orc", "lots")] {
            let card = filled_draft(&mut cards, CharacterKind::Monster, name, hp);
            let err = cards.submit_draft(card, &mut roster).unwrap_err();
            assert!(matches!(err, TrackerError::InvalidInput(_)), "{name:?}/{hp:?}");
            assert!(cards.get(card).unwrap().is_draft());
        }
        assert!(roster.is_empty());
    }

    #[test]
    fn test_duplicate_draft_stays_open() {
        let mut roster = Roster::new();
        let mut cards = HealthCards::new();
        let first = filled_draft(&mut cards, CharacterKind::Player, "Aria", "30");
        cards.submit_draft(first, &mut roster).unwrap();

        let second = filled_draft(&mut cards, CharacterKind::Monster, "Aria", "5");
        let err = cards.submit_draft(second, &mut roster).unwrap_err();
        assert!(matches!(err, TrackerError::DuplicateName(_)));
        assert!(cards.get(second).unwrap().is_draft());
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.find_by_name("Aria").unwrap().max_hp, 30);
    }

    #[test]
    fn test_fields_depend_on_state() {
        let mut card = HealthCard::draft(CharacterKind::Player);
        assert!(card.set_field(CardField::Name, "Aria"));
        assert!(!card.set_field(CardField::Step, "3"));

        let mut card = HealthCard::active(CharacterKind::Player, CharacterId::new());
        assert!(!card.set_field(CardField::MaxHp, "3"));
        assert!(card.set_field(CardField::Step, "3"));
        assert_eq!(card.step_amount().unwrap(), 3);
    }

    #[test]
    fn test_step_and_temp_amounts() {
        let mut card = HealthCard::active(CharacterKind::Player, CharacterId::new());
        card.set_field(CardField::Step, "");
        assert_eq!(card.step_amount().unwrap(), 1);
        card.set_field(CardField::Step, "abc");
        assert!(card.step_amount().is_err());

        assert_eq!(card.temp_amount(), 0);
        card.set_field(CardField::Temp, "7");
        assert_eq!(card.temp_amount(), 7);
        card.set_field(CardField::Temp, "nope");
        assert_eq!(card.temp_amount(), 0);
    }

    #[test]
    fn test_reorder_follows_roster_and_drops_orphans() {
        let mut roster = Roster::new();
        let mut cards = HealthCards::new();
        let a = roster.add_character(Character::player("A", 10)).unwrap();
        let b = roster
            .add_character(Character::player("B", 10).with_initiative(5))
            .unwrap();
        let ghost = CharacterId::new();

        cards.attach(CharacterKind::Player, a);
        let draft = cards.open_draft(CharacterKind::Monster);
        cards.attach(CharacterKind::Player, ghost);
        cards.attach(CharacterKind::Player, b);

        roster.sort_by_initiative();
        cards.reorder(&roster);

        let order: Vec<_> = cards.iter().map(|c| c.character()).collect();
        assert_eq!(order, [Some(b), Some(a), None]);
        assert_eq!(cards.at(2).unwrap().id, draft);
    }

    #[test]
    fn test_views_show_initiative_only_once_assigned() {
        let mut roster = Roster::new();
        let mut cards = HealthCards::new();
        let a = roster
            .add_character(Character::player("A", 10).with_initiative(4))
            .unwrap();
        let card = cards.attach(CharacterKind::Player, a);

        let CardView::Active { initiative, hp_label, .. } = &cards.views(&roster)[0] else {
            panic!("expected active card");
        };
        assert_eq!(*initiative, None);
        assert_eq!(hp_label, "HP: 10/10");

        cards.get_mut(card).unwrap().reveal_initiative();
        let CardView::Active { initiative, .. } = &cards.views(&roster)[0] else {
            panic!("expected active card");
        };
        assert_eq!(*initiative, Some(4));
    }
}
