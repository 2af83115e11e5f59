//! TUI widgets for the tracker

pub mod health_card;
pub mod initiative_form;
pub mod input;
pub mod popup;
pub mod status_bar;
pub mod turn_order;

pub use health_card::{CardGridWidget, FieldEdit};
pub use initiative_form::{FormEdit, InitiativeFormWidget};
pub use input::InputWidget;
pub use popup::{PopupKind, PopupWidget};
pub use status_bar::{HotkeyBarWidget, StatusBarWidget};
pub use turn_order::TurnOrderWidget;
