//! Color theme and styling for the tracker TUI

use ratatui::style::{Color, Modifier, Style};

use tracker_core::CharacterKind;

/// Tracker UI color theme
#[derive(Debug, Clone)]
pub struct GameTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub placeholder: Color,

    // HP colors
    pub hp_healthy: Color,
    pub hp_wounded: Color,
    pub hp_critical: Color,
    pub hp_boosted: Color,

    // Character colors
    pub player: Color,
    pub monster: Color,

    // Notices
    pub notice: Color,
    pub system_text: Color,
}

impl Default for GameTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            placeholder: Color::DarkGray,

            hp_healthy: Color::Green,
            hp_wounded: Color::Yellow,
            hp_critical: Color::Red,
            hp_boosted: Color::LightBlue,

            player: Color::LightGreen,
            monster: Color::LightRed,

            notice: Color::Yellow,
            system_text: Color::DarkGray,
        }
    }
}

impl GameTheme {
    /// Get style for normal text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Get style for system messages
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    /// Get style for empty fields
    pub fn placeholder_style(&self) -> Style {
        Style::default()
            .fg(self.placeholder)
            .add_modifier(Modifier::ITALIC)
    }

    /// Get style for an input cursor
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.border_focused)
            .add_modifier(Modifier::UNDERLINED | Modifier::BOLD)
    }

    /// Get HP bar color. Temporary HP above the maximum gets its own color.
    pub fn hp_color(&self, ratio: f32, boosted: bool) -> Color {
        if boosted {
            self.hp_boosted
        } else if ratio > 0.5 {
            self.hp_healthy
        } else if ratio > 0.25 {
            self.hp_wounded
        } else {
            self.hp_critical
        }
    }

    /// Color that marks players apart from monsters.
    pub fn kind_color(&self, kind: CharacterKind) -> Color {
        match kind {
            CharacterKind::Player => self.player,
            CharacterKind::Monster => self.monster,
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Get title style
    pub fn title_style(&self, focused: bool) -> Style {
        let style = Style::default().fg(if focused {
            self.border_focused
        } else {
            self.foreground
        });

        if focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    /// Get initiative entry style
    pub fn initiative_style(&self, is_selected: bool, kind: CharacterKind) -> Style {
        let style = Style::default().fg(self.kind_color(kind));
        if is_selected {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }
}
