//! Headless command runner for programmatic use.
//!
//! Drives a [`Tracker`] from a line-oriented text protocol instead of a
//! terminal UI. It's designed for:
//! - Scripted encounter setup
//! - Automated testing of whole sessions
//!
//! Prompts and confirmations consume the next input line, so a script
//! answers them inline:
//!
//! ```text
//! monster
//! name 1 Goblin
//! maxhp 1 7
//! set 1
//! 15
//! status
//! ```

use std::io::{self, BufRead, Write};

use crate::card::{CardField, CardId, CardView};
use crate::character::CharacterKind;
use crate::persist::KeyValueStore;
use crate::prompt::Prompter;
use crate::tracker::{Action, Tracker};

/// Help text listing every command.
pub const HELP: &str = "\
Commands (card and turn numbers start at 1):
  player | monster          Open a new draft card
  name <card> <text>        Type a name into a draft card
  maxhp <card> <n>          Type max HP into a draft card
  set <card>                Confirm a draft card
  step <card> <n>           Type the damage/heal step amount
  temp <card> <n>           Type the temporary HP amount
  damage|heal <card>        Apply the step amount
  max <card>                Restore HP to max
  applytemp <card>          Add the temporary HP amount
  editmax <card>            Change max HP (answers follow on the next lines)
  init <name> <n>           Set a character's initiative
  remove <turn>             Remove a character from the turn order
  save | load | clear       Party and roster management
  status                    Show turn order and cards
  help                      Show this help
  quit                      Exit";

/// Prompter that reads answers from the command stream.
///
/// An empty line or end of input cancels a prompt. Confirms accept
/// `y`/`yes` (any case) and decline everything else.
pub struct LinePrompter<'a, R, W> {
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> LinePrompter<'a, R, W> {
    pub fn new(input: &'a mut R, output: &'a mut W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                (!line.trim().is_empty()).then_some(line)
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<'_, R, W> {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        let _ = writeln!(self.output, "[PROMPT] {message} [{default}]");
        self.read_answer()
    }

    fn confirm(&mut self, message: &str) -> bool {
        let _ = writeln!(self.output, "[CONFIRM] {message} (y/n)");
        self.read_answer()
            .map(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
            .unwrap_or(false)
    }

    fn alert(&mut self, message: &str) {
        let _ = writeln!(self.output, "[ALERT] {message}");
    }
}

/// What the runner should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Act(Action),
    /// Fill the add-to-list form and press its button.
    Init { name: String, initiative: String },
    Status,
    Help,
    Quit,
}

/// Runs tracker commands read from `input`, writing results to `output`.
pub struct HeadlessRunner<S, R, W> {
    tracker: Tracker<S>,
    input: R,
    output: W,
}

impl<S: KeyValueStore, R: BufRead, W: Write> HeadlessRunner<S, R, W> {
    pub fn new(tracker: Tracker<S>, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    /// Consume the runner, returning the tracker and output.
    pub fn into_parts(self) -> (Tracker<S>, W) {
        (self.tracker, self.output)
    }

    /// Process commands until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match self.parse(line) {
                Ok(Command::Act(action)) => {
                    let mut prompter = LinePrompter::new(&mut self.input, &mut self.output);
                    let ok = self.tracker.dispatch(action, &mut prompter);
                    writeln!(self.output, "{}", if ok { "[OK]" } else { "[FAILED]" })?;
                }
                Ok(Command::Init { name, initiative }) => {
                    let mut prompter = LinePrompter::new(&mut self.input, &mut self.output);
                    self.tracker.dispatch(Action::EditListName(name), &mut prompter);
                    self.tracker
                        .dispatch(Action::EditListInitiative(initiative), &mut prompter);
                    let ok = self.tracker.dispatch(Action::AddToInitiative, &mut prompter);
                    writeln!(self.output, "{}", if ok { "[OK]" } else { "[FAILED]" })?;
                }
                Ok(Command::Status) => self.write_status()?,
                Ok(Command::Help) => writeln!(self.output, "{HELP}")?,
                Ok(Command::Quit) => break,
                Err(message) => writeln!(self.output, "[ERROR] {message}")?,
            }
        }
        self.output.flush()
    }

    fn parse(&self, line: &str) -> Result<Command, String> {
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(v, r)| (v, r.trim()))
            .unwrap_or((line, ""));

        let action = match verb.to_ascii_lowercase().as_str() {
            "player" => Action::NewCard(CharacterKind::Player),
            "monster" => Action::NewCard(CharacterKind::Monster),
            "name" => self.edit(rest, CardField::Name)?,
            "maxhp" => self.edit(rest, CardField::MaxHp)?,
            "step" => self.edit(rest, CardField::Step)?,
            "temp" => self.edit(rest, CardField::Temp)?,
            "set" => Action::SubmitCard(self.card(rest)?),
            "damage" => Action::Damage(self.card(rest)?),
            "heal" => Action::Heal(self.card(rest)?),
            "max" => Action::RestoreMax(self.card(rest)?),
            "applytemp" => Action::ApplyTemp(self.card(rest)?),
            "editmax" => Action::EditMax(self.card(rest)?),
            "init" => {
                let (name, value) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or("Usage: init <name> <n>")?;
                return Ok(Command::Init {
                    name: name.trim().to_string(),
                    initiative: value.trim().to_string(),
                });
            }
            "remove" => {
                let index = position(rest)?;
                let entry = self
                    .tracker
                    .turn_order()
                    .get(index)
                    .ok_or_else(|| format!("No turn entry {}", index + 1))?;
                Action::RemoveFromTurnOrder(entry.id)
            }
            "save" => Action::SaveParty,
            "load" => Action::LoadParty,
            "clear" => Action::ClearAll,
            "status" => return Ok(Command::Status),
            "help" => return Ok(Command::Help),
            "quit" | "exit" => return Ok(Command::Quit),
            other => return Err(format!("Unknown command: {other}")),
        };
        Ok(Command::Act(action))
    }

    fn card(&self, arg: &str) -> Result<CardId, String> {
        let index = position(arg)?;
        self.tracker
            .cards()
            .at(index)
            .map(|c| c.id)
            .ok_or_else(|| format!("No card {}", index + 1))
    }

    fn edit(&self, rest: &str, field: CardField) -> Result<Action, String> {
        let (card, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        Ok(Action::EditCard {
            card: self.card(card)?,
            field,
            text: text.trim().to_string(),
        })
    }

    fn write_status(&mut self) -> io::Result<()> {
        writeln!(self.output, "[STATUS]")?;
        writeln!(self.output, "  Turn order:")?;
        for (i, entry) in self.tracker.turn_order().iter().enumerate() {
            writeln!(self.output, "    {}. {}", i + 1, entry.label())?;
        }
        writeln!(self.output, "  Cards:")?;
        for (i, view) in self.tracker.card_views().iter().enumerate() {
            match view {
                CardView::Draft {
                    kind,
                    name_input,
                    max_hp_input,
                    ..
                } => writeln!(
                    self.output,
                    "    {}. [{kind} draft] name={name_input:?} maxhp={max_hp_input:?}",
                    i + 1
                )?,
                CardView::Active {
                    kind,
                    name,
                    hp_label,
                    initiative,
                    ..
                } => {
                    let init = initiative
                        .map(|n| format!(" Initiative: {n}"))
                        .unwrap_or_default();
                    writeln!(self.output, "    {}. [{kind}] {name} {hp_label}{init}", i + 1)?
                }
            }
        }
        Ok(())
    }
}

/// Parse a 1-based position into an index.
fn position(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(format!("Expected a number starting at 1, got '{arg}'")),
    }
}
