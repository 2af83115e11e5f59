//! Popup widgets for prompts and confirmations

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::editor::LineEditor;
use crate::ui::layout::centered_rect_fixed;
use crate::ui::theme::GameTheme;
use crate::ui::widgets::InputWidget;

/// What the popup asks for.
#[derive(Debug, Clone, Copy)]
pub enum PopupKind<'a> {
    /// Free text answer being typed into `editor`.
    Prompt(&'a LineEditor),
    /// Yes or no.
    Confirm,
}

/// Centered popup drawn over the last frame.
pub struct PopupWidget<'a> {
    message: &'a str,
    kind: PopupKind<'a>,
    theme: &'a GameTheme,
}

impl<'a> PopupWidget<'a> {
    pub fn new(message: &'a str, kind: PopupKind<'a>, theme: &'a GameTheme) -> Self {
        Self {
            message,
            kind,
            theme,
        }
    }
}

impl Widget for PopupWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_width = u16::try_from(self.message.chars().count()).unwrap_or(u16::MAX);
        let width = text_width.saturating_add(4).clamp(40, 70);
        let popup_area = centered_rect_fixed(width, 8, area);
        Clear.render(popup_area, buf);

        let title = match self.kind {
            PopupKind::Prompt(_) => " Prompt ",
            PopupKind::Confirm => " Confirm ",
        };
        let block = Block::default()
            .title(Span::styled(title, self.theme.title_style(true)))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(3), // Answer
            ])
            .split(inner);

        Paragraph::new(self.message)
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        match self.kind {
            PopupKind::Prompt(editor) => {
                InputWidget::new(editor.text(), self.theme)
                    .cursor_position(editor.cursor_position())
                    .placeholder("Enter to accept, Esc to cancel")
                    .render(chunks[1], buf);
            }
            PopupKind::Confirm => {
                let bold = Style::default().add_modifier(Modifier::BOLD);
                let line = Line::from(vec![
                    Span::styled("[y]", bold.fg(self.theme.hp_healthy)),
                    Span::raw(" Yes    "),
                    Span::styled("[n]", bold.fg(self.theme.hp_critical)),
                    Span::raw(" No"),
                ]);
                Paragraph::new(line).render(chunks[1].inner(Margin::new(1, 1)), buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_prompt_popup_shows_message_and_answer() {
        let editor = LineEditor::new("10");
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PopupWidget::new(
            "Enter initiative for Goblin:",
            PopupKind::Prompt(&editor),
            &GameTheme::default(),
        )
        .render(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("Enter initiative for Goblin:"));
        assert!(text.contains("> 10"));
    }

    #[test]
    fn test_confirm_popup_shows_choices() {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PopupWidget::new("Clear?", PopupKind::Confirm, &GameTheme::default())
            .render(area, &mut buf);
        assert!(screen(&buf).contains("[y] Yes"));
    }

    #[test]
    fn test_popup_with_huge_message_stays_inside_area() {
        let name = "x".repeat(70_000);
        let message = format!("Enter initiative for {name}:");
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        PopupWidget::new(&message, PopupKind::Confirm, &GameTheme::default())
            .render(area, &mut buf);
        assert!(screen(&buf).contains("[y] Yes"));
    }
}
