//! Turn order widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

use tracker_core::TurnEntry;

use crate::ui::theme::GameTheme;

/// Widget displaying characters in initiative order
pub struct TurnOrderWidget<'a> {
    entries: &'a [TurnEntry],
    theme: &'a GameTheme,
    selected: usize,
    focused: bool,
}

impl<'a> TurnOrderWidget<'a> {
    pub fn new(entries: &'a [TurnEntry], theme: &'a GameTheme) -> Self {
        Self {
            entries,
            theme,
            selected: 0,
            focused: false,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Widget for TurnOrderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                " Initiative Order ",
                self.theme.title_style(self.focused),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));

        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(Span::styled("No characters yet.", self.theme.system_style()))
                .render(inner, buf);
            return;
        }

        // Keep the selected row on screen.
        let height = usize::from(inner.height.max(1));
        let skip = (self.selected + 1).saturating_sub(height);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(idx, entry)| {
                let is_selected = self.focused && idx == self.selected;
                let style = self.theme.initiative_style(is_selected, entry.kind);

                let indicator = if is_selected { "> " } else { "  " };
                let line = Line::from(vec![
                    Span::styled(indicator, style),
                    Span::styled(format!("{:2}. ", idx + 1), Style::default().add_modifier(Modifier::DIM)),
                    Span::styled(entry.label(), style),
                ]);

                ListItem::new(line)
            })
            .collect();

        let list = List::new(items);
        Widget::render(list, inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::{CharacterId, CharacterKind};

    #[test]
    fn test_entries_render_in_order() {
        let entries = vec![
            TurnEntry {
                id: CharacterId::new(),
                name: "Bram".to_string(),
                initiative: 20,
                kind: CharacterKind::Player,
            },
            TurnEntry {
                id: CharacterId::new(),
                name: "Goblin".to_string(),
                initiative: 12,
                kind: CharacterKind::Monster,
            },
        ];
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        TurnOrderWidget::new(&entries, &GameTheme::default()).render(area, &mut buf);

        let row = |y: u16| (0..30u16).map(|x| buf[(x, y)].symbol()).collect::<String>();
        assert!(row(1).contains("1. Bram (20)"));
        assert!(row(2).contains("2. Goblin (12)"));
    }
}
