//! Testing utilities for the tracker.
//!
//! This module provides tools for integration testing:
//! - `ScriptedPrompter` for deterministic answers to prompts and confirms
//! - `TestHarness` for scripted tracker scenarios
//! - Assertion helpers for inspecting roster state

use std::collections::VecDeque;

use crate::card::{CardField, CardId, CardView};
use crate::character::CharacterKind;
use crate::config::TrackerConfig;
use crate::persist::MemoryStore;
use crate::prompt::Prompter;
use crate::tracker::{Action, Tracker};

/// A prompter that replays queued answers.
///
/// Prompts with nothing queued are cancelled and confirms with nothing
/// queued are declined. Every question and alert is recorded.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Option<String>>,
    confirmations: VecDeque<bool>,
    prompts: Vec<String>,
    confirms: Vec<String>,
    alerts: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text answer for the next prompt.
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    /// Queue a cancelled prompt.
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Queue an answer for the next confirm.
    pub fn confirming(mut self, yes: bool) -> Self {
        self.confirmations.push_back(yes);
        self
    }

    pub fn queue_answer(&mut self, text: impl Into<String>) {
        self.answers.push_back(Some(text.into()));
    }

    pub fn queue_cancel(&mut self) {
        self.answers.push_back(None);
    }

    pub fn queue_confirm(&mut self, yes: bool) {
        self.confirmations.push_back(yes);
    }

    /// Messages of every prompt asked so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Messages of every confirm asked so far.
    pub fn confirms(&self) -> &[String] {
        &self.confirms
    }

    /// Every alert shown so far.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn clear_alerts(&mut self) {
        self.alerts.clear();
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, message: &str, _default: &str) -> Option<String> {
        self.prompts.push(message.to_string());
        self.answers.pop_front().flatten()
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Test harness for running tracker scenarios.
pub struct TestHarness {
    pub tracker: Tracker<MemoryStore>,
    pub prompter: ScriptedPrompter,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with an empty roster and in-memory storage.
    pub fn new() -> Self {
        Self {
            tracker: Tracker::new(MemoryStore::new(), TrackerConfig::new()),
            prompter: ScriptedPrompter::new(),
        }
    }

    /// Create a harness whose storage already holds data.
    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            tracker: Tracker::new(store, TrackerConfig::new()),
            prompter: ScriptedPrompter::new(),
        }
    }

    /// Dispatch an action through the tracker.
    pub fn act(&mut self, action: Action) -> bool {
        self.tracker.dispatch(action, &mut self.prompter)
    }

    /// Open a draft, fill it in and submit it. Returns the card.
    pub fn create_card(&mut self, kind: CharacterKind, name: &str, max_hp: &str) -> CardId {
        let card = self.tracker.new_card(kind);
        self.act(Action::EditCard {
            card,
            field: CardField::Name,
            text: name.to_string(),
        });
        self.act(Action::EditCard {
            card,
            field: CardField::MaxHp,
            text: max_hp.to_string(),
        });
        self.act(Action::SubmitCard(card));
        card
    }

    pub fn add_player(&mut self, name: &str, max_hp: i32) -> CardId {
        self.create_card(CharacterKind::Player, name, &max_hp.to_string())
    }

    /// Add a monster, answering its initiative prompt (`None` cancels).
    pub fn add_monster(&mut self, name: &str, max_hp: i32, initiative: Option<&str>) -> CardId {
        match initiative {
            Some(text) => self.prompter.queue_answer(text),
            None => self.prompter.queue_cancel(),
        }
        self.create_card(CharacterKind::Monster, name, &max_hp.to_string())
    }

    /// Set a character's initiative through the add-to-list form.
    pub fn set_initiative(&mut self, name: &str, initiative: i32) -> bool {
        self.act(Action::EditListName(name.to_string()));
        self.act(Action::EditListInitiative(initiative.to_string()));
        self.act(Action::AddToInitiative)
    }

    /// Type a step amount and press damage.
    pub fn damage(&mut self, card: CardId, amount: i32) -> bool {
        self.set_field(card, CardField::Step, &amount.to_string());
        self.act(Action::Damage(card))
    }

    /// Type a step amount and press heal.
    pub fn heal(&mut self, card: CardId, amount: i32) -> bool {
        self.set_field(card, CardField::Step, &amount.to_string());
        self.act(Action::Heal(card))
    }

    /// Type a temporary-HP amount and apply it.
    pub fn temp(&mut self, card: CardId, amount: i32) -> bool {
        self.set_field(card, CardField::Temp, &amount.to_string());
        self.act(Action::ApplyTemp(card))
    }

    pub fn set_field(&mut self, card: CardId, field: CardField, text: &str) -> bool {
        self.act(Action::EditCard {
            card,
            field,
            text: text.to_string(),
        })
    }

    /// Get a character's HP as (current, max).
    pub fn hp(&self, name: &str) -> Option<(i32, i32)> {
        self.tracker
            .character(name)
            .map(|c| (c.current_hp, c.max_hp))
    }

    pub fn initiative(&self, name: &str) -> Option<i32> {
        self.tracker.character(name).map(|c| c.initiative)
    }

    /// Names in turn order.
    pub fn turn_names(&self) -> Vec<String> {
        self.tracker
            .turn_order()
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    /// Names on the card area in display order. Drafts show as `None`.
    pub fn card_names(&self) -> Vec<Option<String>> {
        self.tracker
            .card_views()
            .into_iter()
            .map(|view| match view {
                CardView::Active { name, .. } => Some(name),
                CardView::Draft { .. } => None,
            })
            .collect()
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.prompter.last_alert()
    }
}
