//! Main application state and logic

use tracker_core::card::CardField;
use tracker_core::prompt::Prompter;
use tracker_core::{Action, CardId, CardView, FileStore, Tracker};

use crate::editor::LineEditor;
use crate::ui::theme::GameTheme;

/// Vim-style input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigation and hotkeys (default)
    #[default]
    Normal,
    /// Insert mode - typing into a field
    Insert,
}

/// Which panel has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusedPanel {
    #[default]
    Cards,
    Form,
    TurnOrder,
}

impl FocusedPanel {
    pub fn next(self) -> Self {
        match self {
            FocusedPanel::Cards => FocusedPanel::Form,
            FocusedPanel::Form => FocusedPanel::TurnOrder,
            FocusedPanel::TurnOrder => FocusedPanel::Cards,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FocusedPanel::Cards => FocusedPanel::TurnOrder,
            FocusedPanel::Form => FocusedPanel::Cards,
            FocusedPanel::TurnOrder => FocusedPanel::Form,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FocusedPanel::Cards => "CARDS",
            FocusedPanel::Form => "INITIATIVE FORM",
            FocusedPanel::TurnOrder => "TURN ORDER",
        }
    }
}

/// The field being typed into in insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Card { card: CardId, field: CardField },
    FormName,
    FormInitiative,
}

impl EditTarget {
    /// The other field on the same card or form, reached with Tab.
    pub fn sibling(self) -> Self {
        match self {
            EditTarget::Card { card, field } => EditTarget::Card {
                card,
                field: match field {
                    CardField::Name => CardField::MaxHp,
                    CardField::MaxHp => CardField::Name,
                    CardField::Step => CardField::Temp,
                    CardField::Temp => CardField::Step,
                },
            },
            EditTarget::FormName => EditTarget::FormInitiative,
            EditTarget::FormInitiative => EditTarget::FormName,
        }
    }

    /// Action that stores `text` into this field.
    pub fn store(self, text: String) -> Action {
        match self {
            EditTarget::Card { card, field } => Action::EditCard { card, field, text },
            EditTarget::FormName => Action::EditListName(text),
            EditTarget::FormInitiative => Action::EditListInitiative(text),
        }
    }
}

/// Main application state
pub struct App {
    pub tracker: Tracker<FileStore>,

    // UI state
    pub theme: GameTheme,
    pub focused_panel: FocusedPanel,
    pub show_help: bool,
    selected_card: Option<CardId>,
    selected_turn: usize,

    // Input state
    pub input_mode: InputMode,
    editing: Option<EditTarget>,
    editor: LineEditor,

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(tracker: Tracker<FileStore>) -> Self {
        Self {
            tracker,
            theme: GameTheme::default(),
            focused_panel: FocusedPanel::Cards,
            show_help: false,
            selected_card: None,
            selected_turn: 0,
            input_mode: InputMode::Normal,
            editing: None,
            editor: LineEditor::default(),
            status_message: None,
            should_quit: false,
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Display position of the selected card.
    pub fn selected_card(&self) -> usize {
        self.selected_card
            .and_then(|id| self.tracker.cards().position(id))
            .unwrap_or(0)
    }

    pub fn selected_turn(&self) -> usize {
        self.selected_turn
    }

    /// View of the selected card, if there are any cards.
    pub fn selected_view(&self) -> Option<CardView> {
        self.tracker
            .card_views()
            .into_iter()
            .nth(self.selected_card())
    }

    fn select_card_at(&mut self, index: usize) {
        self.selected_card = self.tracker.cards().at(index).map(|card| card.id);
    }

    pub fn select_next_card(&mut self) {
        let count = self.tracker.cards().len();
        if count > 0 {
            self.select_card_at((self.selected_card() + 1) % count);
        }
    }

    pub fn select_prev_card(&mut self) {
        let count = self.tracker.cards().len();
        if count > 0 {
            self.select_card_at((self.selected_card() + count - 1) % count);
        }
    }

    pub fn select_next_turn(&mut self) {
        let count = self.tracker.turn_order().len();
        if count > 0 {
            self.selected_turn = (self.selected_turn + 1) % count;
        }
    }

    pub fn select_prev_turn(&mut self) {
        let count = self.tracker.turn_order().len();
        if count > 0 {
            self.selected_turn = (self.selected_turn + count - 1) % count;
        }
    }

    /// Follow the selected card wherever it moved. If it is gone, select
    /// whatever now sits at `index`, the position it had before.
    fn resolve_selection(&mut self, index: usize) {
        let cards = self.tracker.cards();
        let alive = self
            .selected_card
            .is_some_and(|id| cards.position(id).is_some());
        let last = cards.len().saturating_sub(1);
        if !alive {
            self.select_card_at(index.min(last));
        }
        self.selected_turn = self
            .selected_turn
            .min(self.tracker.turn_order().len().saturating_sub(1));
    }

    // =========================================================================
    // Editing
    // =========================================================================

    pub fn editing(&self) -> Option<EditTarget> {
        self.editing
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LineEditor {
        &mut self.editor
    }

    /// Enter insert mode on `target`, starting from its stored text.
    pub fn begin_edit(&mut self, target: EditTarget) {
        self.editor = LineEditor::new(self.stored_text(target));
        self.editing = Some(target);
        self.input_mode = InputMode::Insert;
    }

    /// Leave insert mode, returning the action that stores the typed text.
    pub fn commit_edit(&mut self) -> Option<Action> {
        self.input_mode = InputMode::Normal;
        let target = self.editing.take()?;
        Some(target.store(self.editor.take()))
    }

    /// Leave insert mode without storing anything.
    pub fn cancel_edit(&mut self) {
        self.input_mode = InputMode::Normal;
        self.editing = None;
        self.editor.take();
    }

    fn stored_text(&self, target: EditTarget) -> String {
        match target {
            EditTarget::FormName => self.tracker.form().name.clone(),
            EditTarget::FormInitiative => self.tracker.form().initiative.clone(),
            EditTarget::Card { card, field } => self
                .tracker
                .card_views()
                .into_iter()
                .find(|view| view.id() == card)
                .and_then(|view| match (view, field) {
                    (CardView::Draft { name_input, .. }, CardField::Name) => Some(name_input),
                    (CardView::Draft { max_hp_input, .. }, CardField::MaxHp) => {
                        Some(max_hp_input)
                    }
                    (CardView::Active { step_input, .. }, CardField::Step) => Some(step_input),
                    (CardView::Active { temp_input, .. }, CardField::Temp) => Some(temp_input),
                    _ => None,
                })
                .unwrap_or_default(),
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Run one action through the tracker, then fix up the selection.
    pub fn dispatch(&mut self, action: Action, prompter: &mut dyn Prompter) -> bool {
        let opens_card = matches!(action, Action::NewCard(_));
        let index = self.selected_card();
        let ok = self.tracker.dispatch(action, prompter);
        if opens_card {
            // Drafts sit at the end of the card area.
            self.select_card_at(self.tracker.cards().len().saturating_sub(1));
            self.focused_panel = FocusedPanel::Cards;
        }
        self.resolve_selection(index);
        ok
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::testing::ScriptedPrompter;
    use tracker_core::{CharacterKind, TrackerConfig};

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let config = TrackerConfig::new().with_save_file(dir.path().join("storage.json"));
        let store = FileStore::new(&config.save_file);
        (App::new(Tracker::new(store, config)), dir)
    }

    #[test]
    fn test_new_card_is_selected() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        app.focused_panel = FocusedPanel::TurnOrder;
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        app.dispatch(Action::NewCard(CharacterKind::Monster), &mut prompter);
        assert_eq!(app.selected_card(), 1);
        assert_eq!(app.focused_panel, FocusedPanel::Cards);
    }

    #[test]
    fn test_edit_round_trip_through_tracker() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        let card = app.selected_view().unwrap().id();

        app.begin_edit(EditTarget::Card {
            card,
            field: CardField::Name,
        });
        assert_eq!(app.input_mode, InputMode::Insert);
        for c in "Aria".chars() {
            app.editor_mut().type_char(c);
        }
        let action = app.commit_edit().unwrap();
        assert_eq!(app.input_mode, InputMode::Normal);
        app.dispatch(action, &mut prompter);

        // Re-entering the field starts from what was stored.
        app.begin_edit(EditTarget::Card {
            card,
            field: CardField::Name,
        });
        assert_eq!(app.editor().text(), "Aria");
        app.cancel_edit();
        assert!(app.editing().is_none());
    }

    #[test]
    fn test_selection_clamped_after_clear() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new().confirming(true);
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        app.dispatch(Action::ClearAll, &mut prompter);
        assert_eq!(app.selected_card(), 0);
        assert!(app.selected_view().is_none());
    }

    #[test]
    fn test_selection_follows_card_after_reorder() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        for (name, hp) in [("Aria", "30"), ("Bram", "22")] {
            app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
            let card = app.selected_view().unwrap().id();
            for (field, text) in [(CardField::Name, name), (CardField::MaxHp, hp)] {
                app.dispatch(
                    EditTarget::Card { card, field }.store(text.to_string()),
                    &mut prompter,
                );
            }
            app.dispatch(Action::SubmitCard(card), &mut prompter);
        }
        let bram = app.selected_view().unwrap().id();
        assert_eq!(app.selected_card(), 1);

        // Bram moves to the front; the selection moves with it.
        app.dispatch(Action::EditListName("Bram".to_string()), &mut prompter);
        app.dispatch(Action::EditListInitiative("15".to_string()), &mut prompter);
        app.dispatch(Action::AddToInitiative, &mut prompter);
        assert_eq!(app.selected_card(), 0);
        assert_eq!(app.selected_view().unwrap().id(), bram);

        app.dispatch(Action::Damage(bram), &mut prompter);
        assert_eq!(app.tracker.character("Bram").unwrap().current_hp, 21);
        assert_eq!(app.tracker.character("Aria").unwrap().current_hp, 30);
    }

    #[test]
    fn test_card_selection_wraps() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        app.dispatch(Action::NewCard(CharacterKind::Player), &mut prompter);
        app.select_prev_card();
        assert_eq!(app.selected_card(), 0);
        app.select_prev_card();
        assert_eq!(app.selected_card(), 1);
    }

    #[test]
    fn test_edit_target_sibling() {
        let card = CardId::new();
        let step = EditTarget::Card {
            card,
            field: CardField::Step,
        };
        assert_eq!(
            step.sibling(),
            EditTarget::Card {
                card,
                field: CardField::Temp
            }
        );
        assert_eq!(EditTarget::FormName.sibling(), EditTarget::FormInitiative);
    }
}
