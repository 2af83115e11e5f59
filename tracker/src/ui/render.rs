//! Main render function

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, EditTarget, FocusedPanel};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    CardGridWidget, FieldEdit, FormEdit, HotkeyBarWidget, InitiativeFormWidget, StatusBarWidget,
    TurnOrderWidget,
};

/// Render the whole screen
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_cards(frame, app, layout.cards_area);
    render_form(frame, app, layout.form_area);
    render_turn_order(frame, app, layout.turn_order_area);
    render_status_bar(frame, app, layout.status_bar);

    frame.render_widget(
        HotkeyBarWidget::new(app.input_mode, app.focused_panel, &app.theme),
        layout.hotkey_bar,
    );

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Combat Tracker ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.tracker.config().save_file.display()),
            app.theme.system_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_cards(frame: &mut Frame, app: &App, area: Rect) {
    let views = app.tracker.card_views();
    let edit = match app.editing() {
        Some(EditTarget::Card { card, field }) => Some(FieldEdit {
            card,
            field,
            text: app.editor().text(),
            cursor: app.editor().cursor_position(),
        }),
        _ => None,
    };

    let widget = CardGridWidget::new(&views, &app.theme)
        .selected(app.selected_card())
        .focused(app.focused_panel == FocusedPanel::Cards)
        .edit(edit);
    frame.render_widget(widget, area);
}

fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let form = app.tracker.form();
    let (text, cursor) = (app.editor().text(), app.editor().cursor_position());
    let edit = match app.editing() {
        Some(EditTarget::FormName) => Some(FormEdit::Name(text, cursor)),
        Some(EditTarget::FormInitiative) => Some(FormEdit::Initiative(text, cursor)),
        _ => None,
    };

    let widget = InitiativeFormWidget::new(&form.name, &form.initiative, &app.theme)
        .focused(app.focused_panel == FocusedPanel::Form)
        .edit(edit);
    frame.render_widget(widget, area);
}

fn render_turn_order(frame: &mut Frame, app: &App, area: Rect) {
    let widget = TurnOrderWidget::new(app.tracker.turn_order(), &app.theme)
        .selected(app.selected_turn())
        .focused(app.focused_panel == FocusedPanel::TurnOrder);
    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let widget = StatusBarWidget::new(
        app.input_mode,
        app.focused_panel,
        app.tracker.roster().len(),
        &app.theme,
    )
    .message(app.status_message());
    frame.render_widget(widget, area);
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(54, 26, area);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default().add_modifier(Modifier::UNDERLINED),
        ))
    };

    let help_text = vec![
        heading("Anywhere (NORMAL mode):"),
        Line::from("  p / m          New player / monster card"),
        Line::from("  S / L          Save / load the party"),
        Line::from("  C              Clear all characters"),
        Line::from("  Tab            Cycle panel focus"),
        Line::from("  q              Quit"),
        Line::from(""),
        heading("Cards:"),
        Line::from("  h/l or ←/→     Select card"),
        Line::from("  i, M, Enter    Name, max HP, set (new cards)"),
        Line::from("  s / t          Type step / temporary HP"),
        Line::from("  d / +          Damage / heal by step"),
        Line::from("  r / T          Restore max / apply temp HP"),
        Line::from("  e              Edit max HP"),
        Line::from("  I              Set initiative for this card"),
        Line::from(""),
        heading("Initiative form and turn order:"),
        Line::from("  i / v, Enter   Type name / number, add"),
        Line::from("  j/k, x         Select, remove character"),
        Line::from(""),
        heading("Typing (INSERT mode):"),
        Line::from("  Enter / Esc    Confirm / cancel"),
        Line::from("  Tab            Next field"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
