//! Event handling for the tracker TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use tracker_core::card::CardField;
use tracker_core::{Action, CardView, CharacterKind};

use crate::app::{App, EditTarget, FocusedPanel, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// Actions to run in order; they may need to prompt the user.
    Dispatch(Vec<Action>),
}

impl EventResult {
    fn one(action: Action) -> Self {
        EventResult::Dispatch(vec![action])
    }
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key_event(app, key),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    if app.show_help {
        app.show_help = false;
        return EventResult::NeedsRedraw;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
    }
}

/// Handle keys in NORMAL mode
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    app.clear_status();

    // Global hotkeys
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('?') => {
            app.toggle_help();
            return EventResult::NeedsRedraw;
        }
        KeyCode::Tab => {
            app.focused_panel = app.focused_panel.next();
            return EventResult::NeedsRedraw;
        }
        KeyCode::BackTab => {
            app.focused_panel = app.focused_panel.prev();
            return EventResult::NeedsRedraw;
        }
        KeyCode::Char('p') => return EventResult::one(Action::NewCard(CharacterKind::Player)),
        KeyCode::Char('m') => return EventResult::one(Action::NewCard(CharacterKind::Monster)),
        KeyCode::Char('S') => return EventResult::one(Action::SaveParty),
        KeyCode::Char('L') => return EventResult::one(Action::LoadParty),
        KeyCode::Char('C') => return EventResult::one(Action::ClearAll),
        _ => {}
    }

    match app.focused_panel {
        FocusedPanel::Cards => handle_cards_key(app, key),
        FocusedPanel::Form => handle_form_key(app, key),
        FocusedPanel::TurnOrder => handle_turn_order_key(app, key),
    }
}

fn handle_cards_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
            app.select_next_card();
            return EventResult::NeedsRedraw;
        }
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
            app.select_prev_card();
            return EventResult::NeedsRedraw;
        }
        _ => {}
    }

    let Some(view) = app.selected_view() else {
        return EventResult::Continue;
    };
    let card = view.id();
    let edit = |field| EditTarget::Card { card, field };

    match view {
        CardView::Draft { .. } => match key.code {
            KeyCode::Char('i') | KeyCode::Char('n') => app.begin_edit(edit(CardField::Name)),
            KeyCode::Char('M') => app.begin_edit(edit(CardField::MaxHp)),
            KeyCode::Enter => return EventResult::one(Action::SubmitCard(card)),
            _ => return EventResult::Continue,
        },
        CardView::Active { name, .. } => match key.code {
            KeyCode::Char('d') | KeyCode::Char('-') => return EventResult::one(Action::Damage(card)),
            KeyCode::Char('+') | KeyCode::Char('=') => return EventResult::one(Action::Heal(card)),
            KeyCode::Char('r') => return EventResult::one(Action::RestoreMax(card)),
            KeyCode::Char('T') => return EventResult::one(Action::ApplyTemp(card)),
            KeyCode::Char('e') => return EventResult::one(Action::EditMax(card)),
            KeyCode::Char('i') | KeyCode::Char('s') | KeyCode::Enter => {
                app.begin_edit(edit(CardField::Step))
            }
            KeyCode::Char('t') => app.begin_edit(edit(CardField::Temp)),
            KeyCode::Char('I') => {
                // Fill the form with this card's name and type the number.
                app.focused_panel = FocusedPanel::Form;
                app.begin_edit(EditTarget::FormInitiative);
                return EventResult::one(Action::EditListName(name));
            }
            _ => return EventResult::Continue,
        },
    }
    EventResult::NeedsRedraw
}

fn handle_form_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('i') | KeyCode::Char('n') => app.begin_edit(EditTarget::FormName),
        KeyCode::Char('v') => app.begin_edit(EditTarget::FormInitiative),
        KeyCode::Enter => return EventResult::one(Action::AddToInitiative),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_turn_order_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.select_next_turn(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev_turn(),
        KeyCode::Char('x') | KeyCode::Delete => {
            // Resolve the row to a character now, not when it was drawn.
            return match app.tracker.turn_order().get(app.selected_turn()) {
                Some(entry) => EventResult::one(Action::RemoveFromTurnOrder(entry.id)),
                None => EventResult::Continue,
            };
        }
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

/// Handle keys in INSERT mode
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.cancel_edit();
            EventResult::NeedsRedraw
        }
        KeyCode::Tab | KeyCode::BackTab => {
            let Some(target) = app.editing() else {
                return EventResult::Continue;
            };
            let actions = app.commit_edit().into_iter().collect();
            // The sibling's stored text is untouched by the commit.
            app.begin_edit(target.sibling());
            EventResult::Dispatch(actions)
        }
        KeyCode::Enter => {
            let target = app.editing();
            let mut actions: Vec<Action> = app.commit_edit().into_iter().collect();
            match target {
                Some(EditTarget::Card {
                    card,
                    field: CardField::Name | CardField::MaxHp,
                }) => actions.push(Action::SubmitCard(card)),
                Some(EditTarget::FormName | EditTarget::FormInitiative) => {
                    actions.push(Action::AddToInitiative)
                }
                _ => {}
            }
            EventResult::Dispatch(actions)
        }
        _ => {
            if app.editor_mut().handle_key(key) {
                EventResult::NeedsRedraw
            } else {
                EventResult::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::testing::ScriptedPrompter;
    use tracker_core::{FileStore, Tracker, TrackerConfig};

    fn test_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        let config = TrackerConfig::new().with_save_file(dir.path().join("storage.json"));
        let store = FileStore::new(&config.save_file);
        (App::new(Tracker::new(store, config)), dir)
    }

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Feed keys, running any dispatched actions with `prompter`.
    fn type_keys(app: &mut App, prompter: &mut ScriptedPrompter, keys: &str) {
        for c in keys.chars() {
            let code = match c {
                '\n' => KeyCode::Enter,
                '\t' => KeyCode::Tab,
                c => KeyCode::Char(c),
            };
            if let EventResult::Dispatch(actions) = press(app, code) {
                for action in actions {
                    app.dispatch(action, prompter);
                }
            }
        }
    }

    #[test]
    fn test_create_player_from_keys() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        type_keys(&mut app, &mut prompter, "piAria\t30\n");

        let aria = app.tracker.character("Aria").unwrap();
        assert_eq!((aria.current_hp, aria.max_hp), (30, 30));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_damage_and_heal_keys() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        type_keys(&mut app, &mut prompter, "piAria\t30\n");
        // Step field starts at "1"; replace it with 12.
        type_keys(&mut app, &mut prompter, "s");
        app.editor_mut().take();
        type_keys(&mut app, &mut prompter, "12\nd");
        assert_eq!(app.tracker.character("Aria").unwrap().current_hp, 18);
        type_keys(&mut app, &mut prompter, "+");
        assert_eq!(app.tracker.character("Aria").unwrap().current_hp, 30);
    }

    #[test]
    fn test_initiative_from_card() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        type_keys(&mut app, &mut prompter, "piAria\t30\n");
        type_keys(&mut app, &mut prompter, "I14\n");

        assert_eq!(app.tracker.character("Aria").unwrap().initiative, 14);
        assert_eq!(app.tracker.form().name, "");
        assert_eq!(app.focused_panel, FocusedPanel::Form);
    }

    #[test]
    fn test_remove_selected_turn_entry() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        type_keys(&mut app, &mut prompter, "piAria\t30\n");
        type_keys(&mut app, &mut prompter, "piBram\t22\n");
        app.focused_panel = FocusedPanel::TurnOrder;
        type_keys(&mut app, &mut prompter, "jx");

        assert!(app.tracker.character("Bram").is_none());
        assert_eq!(app.tracker.roster().len(), 1);
    }

    #[test]
    fn test_escape_discards_typing() {
        let (mut app, _dir) = test_app();
        let mut prompter = ScriptedPrompter::new();
        type_keys(&mut app, &mut prompter, "piAria");
        press(&mut app, KeyCode::Esc);
        type_keys(&mut app, &mut prompter, "\n");

        assert!(app.tracker.roster().is_empty());
        assert!(prompter
            .last_alert()
            .is_some_and(|m| m.starts_with("Invalid input")));
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (mut app, _dir) = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert_eq!(press(&mut app, KeyCode::Char('q')), EventResult::NeedsRedraw);
        assert!(!app.show_help);
    }
}
