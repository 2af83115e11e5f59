//! UI module for the tracker TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
