//! Errors reported back to the user after an action.

use crate::persist::PersistError;
use std::fmt;
use thiserror::Error;

/// Errors from tracker operations.
///
/// None of these are fatal. They are reported at the action that caused
/// them and the roster is left as it was.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Character with this name already exists: {0}")]
    DuplicateName(String),

    #[error("Character not found: {0}. Add an HP card for this character first.")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    EmptySave(EmptySaveKind),

    #[error("Storage error: {0}")]
    Storage(#[from] PersistError),
}

/// Which side of a save/load round trip had nothing to work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptySaveKind {
    /// Save requested with no players on the roster.
    NoPlayers,
    /// Load requested with nothing in the slot.
    NoSavedParty,
}

impl fmt::Display for EmptySaveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptySaveKind::NoPlayers => write!(f, "No player characters to save!"),
            EmptySaveKind::NoSavedParty => write!(f, "No saved party found!"),
        }
    }
}

impl TrackerError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}

/// Parse an integer the way a lenient form field would.
///
/// Surrounding whitespace is ignored, a single sign is accepted, and the
/// longest run of leading digits is used, so `"12abc"` is 12. Returns
/// `None` when there are no leading digits or the value overflows.
pub fn parse_int(text: &str) -> Option<i32> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value: i64 = digits[..end].parse().ok()?;
    let value = if negative { -value } else { value };
    i32::try_from(value).ok()
}
