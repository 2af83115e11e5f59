//! Health card widgets: one card per character plus the grid holding them.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use tracker_core::card::CardField;
use tracker_core::{CardId, CardView};

use crate::ui::layout::CardGrid;
use crate::ui::theme::GameTheme;
use crate::ui::widgets::input::field_line;

/// Text being typed into one card field.
#[derive(Debug, Clone, Copy)]
pub struct FieldEdit<'a> {
    pub card: CardId,
    pub field: CardField,
    pub text: &'a str,
    pub cursor: usize,
}

/// A single health card, draft or active.
pub struct HealthCardWidget<'a> {
    view: &'a CardView,
    theme: &'a GameTheme,
    selected: bool,
    edit: Option<FieldEdit<'a>>,
}

impl<'a> HealthCardWidget<'a> {
    pub fn new(view: &'a CardView, theme: &'a GameTheme) -> Self {
        Self {
            view,
            theme,
            selected: false,
            edit: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn edit(mut self, edit: Option<FieldEdit<'a>>) -> Self {
        self.edit = edit.filter(|e| e.card == self.view.id());
        self
    }

    /// Field line showing live typing when that field is being edited.
    fn field(
        &self,
        label: &'a str,
        field: CardField,
        stored: &'a str,
        placeholder: &'a str,
    ) -> Line<'a> {
        match self.edit {
            Some(edit) if edit.field == field => {
                field_line(label, edit.text, placeholder, Some(edit.cursor), self.theme)
            }
            _ => field_line(label, stored, placeholder, None, self.theme),
        }
    }

    fn hint(&self, text: &'a str) -> Line<'a> {
        if self.selected {
            Line::from(Span::styled(text, self.theme.system_style()))
        } else {
            Line::default()
        }
    }
}

impl Widget for HealthCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let kind = self.view.kind();
        let kind_style = Style::default().fg(self.theme.kind_color(kind));

        match self.view {
            CardView::Draft {
                name_placeholder,
                name_input,
                max_hp_input,
                ..
            } => {
                let block = Block::default()
                    .title(Span::styled(format!(" New {kind} "), kind_style))
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(self.selected));
                let inner = block.inner(area);
                block.render(area, buf);

                let lines = vec![
                    self.field("Name: ", CardField::Name, name_input, name_placeholder),
                    self.field("Max HP: ", CardField::MaxHp, max_hp_input, "Max HP"),
                    Line::default(),
                    self.hint("i:name  M:max hp"),
                    self.hint("Enter:set"),
                ];
                Paragraph::new(lines).render(inner, buf);
            }
            CardView::Active {
                name,
                hp_label,
                current_hp,
                max_hp,
                hp_ratio,
                initiative,
                step_input,
                temp_input,
                ..
            } => {
                let block = Block::default()
                    .title(Span::styled(
                        format!(" {name} "),
                        kind_style.add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(self.theme.border_style(self.selected));
                let inner = block.inner(area);
                block.render(area, buf);

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(1), // Kind and initiative badge
                        Constraint::Length(1), // HP bar
                        Constraint::Min(0),    // Fields and hints
                    ])
                    .split(inner);

                let mut header = vec![Span::styled(kind.to_string(), kind_style)];
                if let Some(initiative) = initiative {
                    header.push(Span::raw("  "));
                    header.push(Span::styled(
                        format!("Initiative: {initiative}"),
                        Style::default().add_modifier(Modifier::BOLD),
                    ));
                }
                Paragraph::new(Line::from(header)).render(chunks[0], buf);

                let boosted = current_hp > max_hp;
                let gauge = Gauge::default()
                    .gauge_style(Style::default().fg(self.theme.hp_color(*hp_ratio, boosted)))
                    .ratio(f64::from(*hp_ratio).clamp(0.0, 1.0))
                    .label(hp_label.as_str());
                gauge.render(chunks[1], buf);

                let lines = vec![
                    self.field("Step: ", CardField::Step, step_input, "1"),
                    self.field("Temp: ", CardField::Temp, temp_input, "0"),
                    self.hint("d:damage +:heal r:max"),
                    self.hint("t:temp T:apply e:edit max"),
                ];
                Paragraph::new(lines).render(chunks[2], buf);
            }
        }
    }
}

/// The card area: every card laid out in a scrolling grid.
pub struct CardGridWidget<'a> {
    views: &'a [CardView],
    theme: &'a GameTheme,
    selected: usize,
    focused: bool,
    edit: Option<FieldEdit<'a>>,
}

impl<'a> CardGridWidget<'a> {
    pub fn new(views: &'a [CardView], theme: &'a GameTheme) -> Self {
        Self {
            views,
            theme,
            selected: 0,
            focused: false,
            edit: None,
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

    pub fn edit(mut self, edit: Option<FieldEdit<'a>>) -> Self {
        self.edit = edit;
        self
    }
}

impl Widget for CardGridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Span::styled(
                format!(" Health Cards ({}) ", self.views.len()),
                self.theme.title_style(self.focused),
            ))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.focused));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.views.is_empty() {
            let hint = Line::from(Span::styled(
                "Press p to add a player or m to add a monster.",
                self.theme.system_style(),
            ));
            Paragraph::new(hint).render(inner, buf);
            return;
        }

        let grid = CardGrid::fit(inner, self.selected);
        for (index, view) in self.views.iter().enumerate() {
            let Some(slot) = grid.slot(inner, index) else {
                continue;
            };
            HealthCardWidget::new(view, self.theme)
                .selected(self.focused && index == self.selected)
                .edit(self.edit)
                .render(slot, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::card::HealthCards;
    use tracker_core::{Character, CharacterKind, Roster};

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
    fn test_active_card_shows_hp_and_badge() {
        let mut roster = Roster::new();
        let id = roster
            .add_character(Character::player("Aria", 30).with_initiative(12))
            .unwrap();
        let mut cards = HealthCards::new();
        let card = cards.attach(CharacterKind::Player, id);
        cards.get_mut(card).unwrap().reveal_initiative();

        let views = cards.views(&roster);
        let area = Rect::new(0, 0, 32, 8);
        let mut buf = Buffer::empty(area);
        HealthCardWidget::new(&views[0], &GameTheme::default()).render(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("Aria"));
        assert!(text.contains("Initiative: 12"));
        assert!(text.contains("HP: 30/30"));
        assert!(text.contains("Step: 1"));
    }

    #[test]
    fn test_draft_card_shows_live_typing() {
        let mut cards = HealthCards::new();
        let card = cards.open_draft(CharacterKind::Monster);
        let views = cards.views(&Roster::new());
        let area = Rect::new(0, 0, 32, 8);
        let mut buf = Buffer::empty(area);
        HealthCardWidget::new(&views[0], &GameTheme::default())
            .selected(true)
            .edit(Some(FieldEdit {
                card,
                field: CardField::Name,
                text: "Gob",
                cursor: 3,
            }))
            .render(area, &mut buf);

        let text = screen(&buf);
        assert!(text.contains("New Monster"));
        assert!(text.contains("Name: Gob"));
        assert!(text.contains("Max HP: Max HP"));
    }

    #[test]
    fn test_empty_grid_shows_hint() {
        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        CardGridWidget::new(&[], &GameTheme::default()).render(area, &mut buf);
        assert!(screen(&buf).contains("Press p to add a player"));
    }
}
