//! User-facing output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for pipes, CI and other headless runs
//! - [`MockUI`] capturing everything for assertions
//! - Spinners and tables
//!
//! Progress is reported as tagged status lines such as
//! `[INSTALL] Installing hermes...`.
//!
//! # Example
//!
//! ```
//! use sst_elements::ui::{create_ui, OutputMode, Tag};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.status(Tag::Depend, "Gathering dependencies for hermes...");
//! ui.success("Installed miranda, hermes");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ElementsTheme};

use std::fmt;

/// Category of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Building and registering.
    Install,
    /// Deleting and unregistering.
    Remove,
    /// Dependency discovery.
    Depend,
    /// Network and version-control requests.
    Request,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Self::Install => "INSTALL",
            Self::Remove => "REMOVE",
            Self::Depend => "DEPEND",
            Self::Request => "REQUEST",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a tagged progress line. Hidden in quiet mode.
    fn status(&mut self, tag: Tag, msg: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, tag: Tag, message: &str) -> Box<dyn SpinnerHandle>;

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Mark as skipped.
    fn finish_skipped(&mut self, msg: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_render_bracketed() {
        assert_eq!(Tag::Install.to_string(), "[INSTALL]");
        assert_eq!(Tag::Remove.to_string(), "[REMOVE]");
        assert_eq!(Tag::Depend.to_string(), "[DEPEND]");
        assert_eq!(Tag::Request.to_string(), "[REQUEST]");
    }
}
