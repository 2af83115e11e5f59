//! Synchronous user-input collaborators.
//!
//! Each call blocks until the user answers, like a modal dialog. While one
//! is open no other action can run.

/// Asks the user for text, a yes/no answer, or shows them a notice.
pub trait Prompter {
    /// Ask for a line of text. `None` means the user cancelled.
    fn prompt(&mut self, message: &str, default: &str) -> Option<String>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a notification.
    fn alert(&mut self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn prompt(&mut self, message: &str, default: &str) -> Option<String> {
        (**self).prompt(message, default)
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }
}
