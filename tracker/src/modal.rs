//! Blocking prompts drawn over the tracker screen.
//!
//! While a prompt is open the main loop is suspended: the popup runs its own
//! event loop on the same terminal and returns the answer to the caller.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, buffer::Buffer, Terminal};
use tracing::{debug, warn};

use tracker_core::prompt::Prompter;

use crate::editor::LineEditor;
use crate::ui::theme::GameTheme;
use crate::ui::widgets::{PopupKind, PopupWidget};

/// [`Prompter`] that asks through popups on the live terminal.
///
/// Alerts do not block; they are collected for the status bar.
pub struct TerminalPrompter<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    /// Last full frame, redrawn under each popup.
    backdrop: &'a Buffer,
    theme: GameTheme,
    notices: Vec<String>,
}

impl<'a, B: Backend> TerminalPrompter<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, backdrop: &'a Buffer, theme: GameTheme) -> Self {
        Self {
            terminal,
            backdrop,
            theme,
            notices: Vec::new(),
        }
    }

    /// Alerts raised so far, oldest first.
    pub fn into_notices(self) -> Vec<String> {
        self.notices
    }

    fn draw(&mut self, message: &str, kind: PopupKind<'_>) -> io::Result<()> {
        let backdrop = self.backdrop;
        let theme = &self.theme;
        self.terminal.draw(|f| {
            let area = f.area();
            // A resize since the backdrop was taken leaves a blank screen.
            if backdrop.area == area {
                f.buffer_mut().merge(backdrop);
            }
            f.render_widget(PopupWidget::new(message, kind, theme), area);
        })?;
        Ok(())
    }

    fn next_key() -> io::Result<KeyEvent> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key);
                }
            }
        }
    }

    fn run_prompt(&mut self, message: &str, default: &str) -> io::Result<Option<String>> {
        let mut editor = LineEditor::new(default);
        loop {
            self.draw(message, PopupKind::Prompt(&editor))?;
            let key = Self::next_key()?;
            match key.code {
                KeyCode::Enter => return Ok(Some(editor.take())),
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                _ => {
                    editor.handle_key(key);
                }
            }
        }
    }

    fn run_confirm(&mut self, message: &str) -> io::Result<bool> {
        loop {
            self.draw(message, PopupKind::Confirm)?;
            match Self::next_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                _ => {}
            }
        }
    }
}

impl<B: Backend> Prompter for TerminalPrompter<'_, B> {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        match self.run_prompt(message, default) {
            Ok(answer) => {
                debug!(message, answered = answer.is_some(), "prompt closed");
                answer
            }
            Err(e) => {
                warn!(error = %e, "prompt failed; treating as cancelled");
                None
            }
        }
    }

    fn confirm(&mut self, message: &str) -> bool {
        match self.run_confirm(message) {
            Ok(yes) => {
                debug!(message, yes, "confirm closed");
                yes
            }
            Err(e) => {
                warn!(error = %e, "confirm failed; treating as declined");
                false
            }
        }
    }

    fn alert(&mut self, message: &str) {
        debug!(message, "notice");
        self.notices.push(message.to_string());
    }
}
