//! Status bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{FocusedPanel, InputMode};
use crate::ui::theme::GameTheme;

/// Status bar showing mode, roster size and the latest notice
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    focused_panel: FocusedPanel,
    character_count: usize,
    theme: &'a GameTheme,
    message: Option<&'a str>,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(
        input_mode: InputMode,
        focused_panel: FocusedPanel,
        character_count: usize,
        theme: &'a GameTheme,
    ) -> Self {
        Self {
            input_mode,
            focused_panel,
            character_count,
            theme,
            message: None,
        }
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Input mode indicator (vim-style)
        let (input_mode_text, input_mode_style) = match self.input_mode {
            InputMode::Normal => (
                "NORMAL",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            InputMode::Insert => (
                "INSERT",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };

        let mut spans = vec![
            Span::styled(format!("-- {input_mode_text} --"), input_mode_style),
            Span::raw(" | "),
            Span::styled(self.focused_panel.label(), self.theme.title_style(false)),
            Span::raw(" | "),
            Span::raw(format!("{} characters", self.character_count)),
        ];

        if let Some(msg) = self.message {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                msg,
                Style::default()
                    .fg(self.theme.notice)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    focused_panel: FocusedPanel,
    theme: &'a GameTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, focused_panel: FocusedPanel, theme: &'a GameTheme) -> Self {
        Self {
            input_mode,
            focused_panel,
            theme,
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hotkeys = match self.input_mode {
            InputMode::Normal => match self.focused_panel {
                FocusedPanel::Cards => vec![
                    ("p:player", true),
                    ("m:monster", true),
                    ("h/l:select", true),
                    ("I:initiative", true),
                    ("S:save", false),
                    ("L:load", false),
                    ("C:clear", false),
                    ("?:help", false),
                ],
                FocusedPanel::Form => vec![
                    ("i:name", true),
                    ("v:initiative", true),
                    ("Enter:add", true),
                    ("Tab:panel", false),
                    ("?:help", false),
                ],
                FocusedPanel::TurnOrder => vec![
                    ("j/k:select", true),
                    ("x:remove", true),
                    ("Tab:panel", false),
                    ("?:help", false),
                ],
            },
            InputMode::Insert => vec![
                ("Esc:cancel", true),
                ("Enter:confirm", true),
                ("Tab:next field", true),
                ("Ctrl+u:clear", false),
            ],
        };

        let spans: Vec<Span> = hotkeys
            .into_iter()
            .flat_map(|(key, primary)| {
                let style = if primary {
                    self.theme.text_style()
                } else {
                    self.theme.system_style()
                };
                [Span::styled(key, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
