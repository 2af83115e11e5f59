//! Layout calculations for the tracker TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of one health card, borders included.
pub const CARD_WIDTH: u16 = 32;

/// Height of one health card, borders included.
pub const CARD_HEIGHT: u16 = 8;

/// Main layout areas
pub struct AppLayout {
    pub title_area: Rect,
    pub cards_area: Rect,
    pub form_area: Rect,
    pub turn_order_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(8),    // Main content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        // Content area: card grid + initiative sidebar
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(main_chunks[1]);

        let sidebar_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Add-to-initiative form
                Constraint::Min(3),    // Turn order
            ])
            .split(content_chunks[1]);

        Self {
            title_area: main_chunks[0],
            cards_area: content_chunks[0],
            form_area: sidebar_chunks[0],
            turn_order_area: sidebar_chunks[1],
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
        }
    }
}

/// Placement of cards inside the card area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardGrid {
    pub columns: usize,
    pub visible_rows: usize,
    /// First grid row drawn.
    pub first_row: usize,
}

impl CardGrid {
    /// Fit cards into `area`, scrolled so that card `selected` is visible.
    pub fn fit(area: Rect, selected: usize) -> Self {
        let columns = usize::from((area.width / CARD_WIDTH).max(1));
        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let selected_row = selected / columns;
        Self {
            columns,
            visible_rows,
            first_row: (selected_row + 1).saturating_sub(visible_rows),
        }
    }

    /// Screen rectangle of card `index`, if it falls in the visible window.
    pub fn slot(&self, area: Rect, index: usize) -> Option<Rect> {
        let row = index / self.columns;
        if row < self.first_row || row >= self.first_row + self.visible_rows {
            return None;
        }
        let col = (index % self.columns) as u16;
        let row = (row - self.first_row) as u16;
        let rect = Rect::new(
            area.x + col * CARD_WIDTH,
            area.y + row * CARD_HEIGHT,
            CARD_WIDTH,
            CARD_HEIGHT,
        );
        Some(rect.intersection(area))
    }
}

/// Calculate fixed-size centered popup
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
