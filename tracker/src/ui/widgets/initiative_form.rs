//! Add-to-initiative form widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;
use crate::ui::widgets::input::field_line;

/// Which form field has live typing, and where the cursor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEdit<'a> {
    Name(&'a str, usize),
    Initiative(&'a str, usize),
}

/// Name and initiative fields plus the add hint.
pub struct InitiativeFormWidget<'a> {
    name: &'a str,
    initiative: &'a str,
    theme: &'a GameTheme,
    focused: bool,
    edit: Option<FormEdit<'a>>,
}

impl<'a> InitiativeFormWidget<'a> {
    pub fn new(name: &'a str, initiative: &'a str, theme: &'a GameTheme) -> Self {
        Self {
            name,
            initiative,
            theme,
            focused: false,
            edit: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn edit(mut self, edit: Option<FormEdit<'a>>) -> Self {
        self.edit = edit;
        self
    }
}

impl Widget for InitiativeFormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                " Add to Initiative ",
                self.theme.title_style(self.focused),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        let name = match self.edit {
            Some(FormEdit::Name(text, cursor)) => {
                field_line("Name: ", text, "", Some(cursor), self.theme)
            }
            _ => field_line("Name: ", self.name, "Character name", None, self.theme),
        };
        let initiative = match self.edit {
            Some(FormEdit::Initiative(text, cursor)) => {
                field_line("Initiative: ", text, "", Some(cursor), self.theme)
            }
            _ => field_line("Initiative: ", self.initiative, "Roll", None, self.theme),
        };
        let hint = if self.focused {
            Line::from(Span::styled(
                "i:name v:initiative Enter:add",
                self.theme.system_style(),
            ))
        } else {
            Line::default()
        };

        Paragraph::new(vec![name, initiative, hint]).render(inner, buf);
    }
}
