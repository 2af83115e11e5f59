//! Input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::GameTheme;

/// Build one `label: value` line, drawing a cursor when `cursor` is set.
///
/// Empty values show `placeholder` instead.
pub fn field_line<'a>(
    label: &'a str,
    content: &'a str,
    placeholder: &'a str,
    cursor: Option<usize>,
    theme: &GameTheme,
) -> Line<'a> {
    let label_style = match cursor {
        Some(_) => theme.title_style(true),
        None => theme.system_style(),
    };
    let mut spans = vec![Span::styled(label, label_style)];

    match cursor {
        None if content.is_empty() => {
            spans.push(Span::styled(placeholder, theme.placeholder_style()));
        }
        None => spans.push(Span::styled(content, theme.text_style())),
        Some(cursor_position) => {
            // Use character-based slicing for unicode safety
            let before_cursor: String = content.chars().take(cursor_position).collect();
            let at_cursor = content
                .chars()
                .nth(cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = content.chars().skip(cursor_position + 1).collect();

            spans.push(Span::raw(before_cursor));
            spans.push(Span::styled(at_cursor, theme.cursor_style()));
            spans.push(Span::raw(after_cursor));
        }
    }
    Line::from(spans)
}

/// Boxed single-line input, used by prompt popups.
pub struct InputWidget<'a> {
    content: &'a str,
    cursor_position: usize,
    theme: &'a GameTheme,
    placeholder: &'a str,
}

impl<'a> InputWidget<'a> {
    pub fn new(content: &'a str, theme: &'a GameTheme) -> Self {
        Self {
            content,
            cursor_position: content.chars().count(),
            theme,
            placeholder: "",
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = placeholder;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let inner = block.inner(area);
        block.render(area, buf);

        let line = if self.content.is_empty() {
            field_line("> ", "", self.placeholder, None, self.theme)
        } else {
            field_line("> ", self.content, "", Some(self.cursor_position), self.theme)
        };
        Paragraph::new(line).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let theme = GameTheme::default();
        let line = field_line("Name: ", "", "Player Name", None, &theme);
        assert_eq!(text(&line), "Name: Player Name");
    }

    #[test]
    fn test_cursor_at_end_adds_blank_cell() {
        let theme = GameTheme::default();
        let line = field_line("Step: ", "12", "", Some(2), &theme);
        assert_eq!(text(&line), "Step: 12 ");
    }

    #[test]
    fn test_input_widget_renders_content() {
        let theme = GameTheme::default();
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        InputWidget::new("15", &theme).render(area, &mut buf);
        let row: String = (0..20u16).map(|x| buf[(x, 1u16)].symbol()).collect();
        assert!(row.contains("> 15"));
    }
}
