//! Tracker - the interaction controller.
//!
//! Binds every control on the visual surface to a roster mutation and then
//! re-renders the turn list and the card area from the roster. All state is
//! owned here and passed to the views explicitly.

use crate::card::{CardField, CardId, CardView, HealthCards};
use crate::character::{Character, CharacterId, CharacterKind};
use crate::config::TrackerConfig;
use crate::error::{parse_int, EmptySaveKind, TrackerError};
use crate::initiative::{build_turn_order, TurnEntry};
use crate::persist::{KeyValueStore, PartyGateway};
use crate::prompt::Prompter;
use crate::roster::Roster;
use tracing::{debug, info, warn};

/// Notice shown after a successful save.
pub const SAVED_NOTICE: &str = "Party saved successfully!";

/// Notice shown after a successful load.
pub const LOADED_NOTICE: &str = "Party loaded successfully!";

/// One user-facing control being used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a draft card.
    NewCard(CharacterKind),
    /// Type into a card field.
    EditCard {
        card: CardId,
        field: CardField,
        text: String,
    },
    /// Confirm a draft card.
    SubmitCard(CardId),
    Damage(CardId),
    Heal(CardId),
    RestoreMax(CardId),
    ApplyTemp(CardId),
    EditMax(CardId),
    /// Type into the name field of the add-to-list form.
    EditListName(String),
    /// Type into the initiative field of the add-to-list form.
    EditListInitiative(String),
    /// Press the add-to-list button.
    AddToInitiative,
    RemoveFromTurnOrder(CharacterId),
    SaveParty,
    LoadParty,
    ClearAll,
}

/// Text currently in the add-to-list form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitiativeForm {
    pub name: String,
    pub initiative: String,
}

/// Result of a load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Characters were merged in; the count excludes skipped names.
    Loaded(usize),
    /// The user declined to merge into a non-empty roster.
    Declined,
}

/// The combat tracker: roster, cards, turn order and saved party.
pub struct Tracker<S> {
    config: TrackerConfig,
    roster: Roster,
    cards: HealthCards,
    party: PartyGateway<S>,
    turn_order: Vec<TurnEntry>,
    form: InitiativeForm,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Create an empty tracker saving into `store`.
    pub fn new(store: S, config: TrackerConfig) -> Self {
        let party = PartyGateway::with_key(store, config.slot_key.clone());
        Self {
            config,
            roster: Roster::new(),
            cards: HealthCards::new(),
            party,
            turn_order: Vec::new(),
            form: InitiativeForm::default(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn cards(&self) -> &HealthCards {
        &self.cards
    }

    pub fn card_views(&self) -> Vec<CardView> {
        self.cards.views(&self.roster)
    }

    /// The turn list as of the last render.
    pub fn turn_order(&self) -> &[TurnEntry] {
        &self.turn_order
    }

    pub fn form(&self) -> &InitiativeForm {
        &self.form
    }

    pub fn party(&self) -> &PartyGateway<S> {
        &self.party
    }

    pub fn character(&self, name: &str) -> Option<&Character> {
        self.roster.find_by_name(name)
    }

    /// Re-render both views from the roster.
    fn render(&mut self) {
        self.turn_order = build_turn_order(&mut self.roster);
        self.cards.reorder(&self.roster);
    }

    /// Resolve an active card to the name of its character.
    fn card_character(&self, card: CardId) -> Result<(CharacterId, String), TrackerError> {
        let card = self
            .cards
            .get(card)
            .ok_or_else(|| TrackerError::invalid("no such card"))?;
        let id = card
            .character()
            .ok_or_else(|| TrackerError::invalid("card has not been set up yet"))?;
        let character = self
            .roster
            .get(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
        Ok((id, character.name.clone()))
    }

    // =========================================================================
    // Health cards
    // =========================================================================

    /// Open a new draft card.
    pub fn new_card(&mut self, kind: CharacterKind) -> CardId {
        let id = self.cards.open_draft(kind);
        debug!(card = %id, kind = %kind, "draft card opened");
        id
    }

    /// Replace the text of a card field.
    pub fn set_card_field(
        &mut self,
        card: CardId,
        field: CardField,
        text: impl Into<String>,
    ) -> Result<(), TrackerError> {
        let card = self
            .cards
            .get_mut(card)
            .ok_or_else(|| TrackerError::invalid("no such card"))?;
        if card.set_field(field, text) {
            Ok(())
        } else {
            Err(TrackerError::invalid(format!("{field:?} is not editable on this card")))
        }
    }

    /// Confirm a draft card, creating its character.
    ///
    /// Monsters are asked for their initiative straight away. Cancelling or
    /// answering with something that is not a number leaves it at 0.
    pub fn submit_card(
        &mut self,
        card: CardId,
        prompter: &mut dyn Prompter,
    ) -> Result<CharacterId, TrackerError> {
        let id = self.cards.submit_draft(card, &mut self.roster)?;
        self.render();

        let Some(character) = self.roster.get(id) else {
            return Ok(id);
        };
        if character.is_monster() {
            let name = character.name.clone();
            let answer = prompter.prompt(
                &format!("Enter initiative for {name}:"),
                &self.config.monster_initiative_hint,
            );
            match answer.as_deref().and_then(parse_int) {
                Some(initiative) => {
                    self.roster.update_initiative(&name, initiative)?;
                    if let Some(card) = self.cards.for_character_mut(id) {
                        card.reveal_initiative();
                    }
                    self.render();
                }
                None => debug!(name = %name, "monster initiative left at 0"),
            }
        }
        Ok(id)
    }

    /// Damage by the card's step amount.
    pub fn damage(&mut self, card: CardId) -> Result<i32, TrackerError> {
        self.step_hp(card, -1)
    }

    /// Heal by the card's step amount.
    pub fn heal(&mut self, card: CardId) -> Result<i32, TrackerError> {
        self.step_hp(card, 1)
    }

    fn step_hp(&mut self, card: CardId, sign: i32) -> Result<i32, TrackerError> {
        let (_, name) = self.card_character(card)?;
        let step = self
            .cards
            .get(card)
            .ok_or_else(|| TrackerError::invalid("no such card"))?
            .step_amount()?;
        let hp = self.roster.adjust_hp(&name, step.saturating_mul(sign))?;
        self.render();
        Ok(hp)
    }

    /// Set current HP back to max.
    pub fn restore_max(&mut self, card: CardId) -> Result<(), TrackerError> {
        let (_, name) = self.card_character(card)?;
        self.roster.set_hp_to_max(&name)?;
        self.render();
        Ok(())
    }

    /// Add the card's temporary-HP amount. Non-positive amounts do nothing.
    pub fn apply_temp(&mut self, card: CardId) -> Result<bool, TrackerError> {
        let (_, name) = self.card_character(card)?;
        let amount = self
            .cards
            .get(card)
            .map(|c| c.temp_amount())
            .unwrap_or_default();
        let applied = self.roster.add_temporary_hp(&name, amount)?;
        self.render();
        Ok(applied)
    }

    /// Ask for a new max HP, then whether to heal up to it.
    ///
    /// Returns false if the user cancelled.
    pub fn edit_max(
        &mut self,
        card: CardId,
        prompter: &mut dyn Prompter,
    ) -> Result<bool, TrackerError> {
        let (id, name) = self.card_character(card)?;
        let current_max = self
            .roster
            .get(id)
            .map(|c| c.max_hp)
            .unwrap_or_default();

        let Some(answer) = prompter.prompt(
            &format!("Edit max HP for {name} (current: {current_max}):"),
            &current_max.to_string(),
        ) else {
            return Ok(false);
        };
        let new_max = parse_int(&answer)
            .filter(|hp| *hp > 0)
            .ok_or_else(|| TrackerError::invalid("Please enter a valid number greater than 0"))?;

        let rebase = prompter.confirm("Do you want to update current HP to the new maximum?");
        self.roster.set_max_hp(&name, new_max, rebase)?;
        self.render();
        Ok(true)
    }

    // =========================================================================
    // Initiative list
    // =========================================================================

    pub fn set_list_name(&mut self, text: impl Into<String>) {
        self.form.name = text.into();
    }

    pub fn set_list_initiative(&mut self, text: impl Into<String>) {
        self.form.initiative = text.into();
    }

    /// Assign an initiative to an existing character.
    pub fn add_to_initiative(&mut self, name: &str, initiative: &str) -> Result<(), TrackerError> {
        let name = name.trim();
        let value = parse_int(initiative);
        let (false, Some(value)) = (name.is_empty(), value) else {
            return Err(TrackerError::invalid(
                "Please provide both a name and an initiative value.",
            ));
        };

        self.roster.update_initiative(name, value)?;
        if let Some(id) = self.roster.find_by_name(name).map(|c| c.id) {
            if let Some(card) = self.cards.for_character_mut(id) {
                card.reveal_initiative();
            }
        }
        self.render();
        Ok(())
    }

    /// Submit the add-to-list form, clearing it on success.
    pub fn submit_initiative_form(&mut self) -> Result<(), TrackerError> {
        let InitiativeForm { name, initiative } = self.form.clone();
        self.add_to_initiative(&name, &initiative)?;
        self.form = InitiativeForm::default();
        Ok(())
    }

    /// Remove a character and its card from the turn list.
    ///
    /// The entry is looked up by id when this runs, so later re-sorts can't
    /// redirect it to someone else.
    pub fn remove_from_turn_order(&mut self, id: CharacterId) -> Result<Character, TrackerError> {
        let removed = self
            .roster
            .remove(id)
            .ok_or_else(|| TrackerError::NotFound(id.to_string()))?;
        self.render();
        Ok(removed)
    }

    // =========================================================================
    // Party
    // =========================================================================

    /// Save every player on the roster. Returns how many were saved.
    pub fn save_party(&mut self) -> Result<usize, TrackerError> {
        if self.roster.players().next().is_none() {
            return Err(TrackerError::EmptySave(EmptySaveKind::NoPlayers));
        }
        Ok(self.party.save(self.roster.players())?)
    }

    /// Merge the saved party into the roster.
    ///
    /// Names already on the roster are skipped and the live character is
    /// left alone. A non-empty roster needs confirmation first.
    pub fn load_party(&mut self, prompter: &mut dyn Prompter) -> Result<LoadOutcome, TrackerError> {
        let saved = self.party.load();
        if saved.is_empty() {
            return Err(TrackerError::EmptySave(EmptySaveKind::NoSavedParty));
        }

        if !self.roster.is_empty()
            && !prompter.confirm("Load saved party? This will add to your current characters.")
        {
            return Ok(LoadOutcome::Declined);
        }

        let mut loaded = 0;
        for character in saved {
            if self.roster.contains_name(&character.name) {
                debug!(name = %character.name, "skipping saved character already on roster");
                continue;
            }
            let kind = character.kind;
            let has_initiative = character.initiative != 0;
            let id = self.roster.add_character(character)?;
            let card = self.cards.attach(kind, id);
            if has_initiative {
                if let Some(card) = self.cards.get_mut(card) {
                    card.reveal_initiative();
                }
            }
            loaded += 1;
        }

        self.render();
        info!(loaded, "party loaded");
        Ok(LoadOutcome::Loaded(loaded))
    }

    /// Empty the roster and the card area after confirmation.
    pub fn clear_all(&mut self, prompter: &mut dyn Prompter) -> bool {
        if !prompter.confirm("Are you sure you want to clear all characters?") {
            return false;
        }
        self.roster.clear();
        self.cards.clear();
        self.render();
        info!("roster cleared");
        true
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Run one action and report its outcome to the user.
    ///
    /// Errors stop here: they are logged and shown through `alert`.
    /// Returns whether the action succeeded.
    pub fn dispatch(&mut self, action: Action, prompter: &mut dyn Prompter) -> bool {
        debug!(?action, "dispatch");
        let result = match action {
            Action::NewCard(kind) => {
                self.new_card(kind);
                Ok(())
            }
            Action::EditCard { card, field, text } => self.set_card_field(card, field, text),
            Action::SubmitCard(card) => self.submit_card(card, prompter).map(drop),
            Action::Damage(card) => self.damage(card).map(drop),
            Action::Heal(card) => self.heal(card).map(drop),
            Action::RestoreMax(card) => self.restore_max(card),
            Action::ApplyTemp(card) => self.apply_temp(card).map(drop),
            Action::EditMax(card) => self.edit_max(card, prompter).map(drop),
            Action::EditListName(text) => {
                self.set_list_name(text);
                Ok(())
            }
            Action::EditListInitiative(text) => {
                self.set_list_initiative(text);
                Ok(())
            }
            Action::AddToInitiative => self.submit_initiative_form(),
            Action::RemoveFromTurnOrder(id) => self.remove_from_turn_order(id).map(drop),
            Action::SaveParty => self.save_party().map(|_| prompter.alert(SAVED_NOTICE)),
            Action::LoadParty => self.load_party(prompter).map(|outcome| {
                if let LoadOutcome::Loaded(_) = outcome {
                    prompter.alert(LOADED_NOTICE);
                }
            }),
            Action::ClearAll => {
                self.clear_all(prompter);
                Ok(())
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "action failed");
                prompter.alert(&e.to_string());
                false
            }
        }
    }
}
