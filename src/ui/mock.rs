//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use sst_elements::ui::{MockUI, Tag, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.status(Tag::Install, "Installing hermes...");
//! ui.success("Installed hermes");
//!
//! assert!(ui.has_status(Tag::Install, "hermes"));
//! assert!(ui.has_success("Installed hermes"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, Tag, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    statuses: Vec<(Tag, String)>,
    spinners: Vec<Rc<RefCell<MockSpinnerState>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured status lines.
    pub fn statuses(&self) -> &[(Tag, String)] {
        &self.statuses
    }

    /// Snapshot of every spinner started so far.
    pub fn spinners(&self) -> Vec<MockSpinner> {
        self.spinners
            .iter()
            .map(|state| MockSpinner {
                state: Rc::clone(state),
            })
            .collect()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a status line with this tag mentioned `msg`.
    pub fn has_status(&self, tag: Tag, msg: &str) -> bool {
        self.statuses
            .iter()
            .any(|(t, m)| *t == tag && m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn status(&mut self, tag: Tag, msg: &str) {
        self.statuses.push((tag, msg.to_string()));
    }

    fn start_spinner(&mut self, tag: Tag, message: &str) -> Box<dyn SpinnerHandle> {
        let state = Rc::new(RefCell::new(MockSpinnerState {
            tag: Some(tag),
            messages: vec![message.to_string()],
            ..Default::default()
        }));
        self.spinners.push(Rc::clone(&state));
        Box::new(MockSpinner { state })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
    /// Finished as skipped.
    Skipped,
}

#[derive(Debug, Default)]
struct MockSpinnerState {
    tag: Option<Tag>,
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Mock spinner sharing its state with the [`MockUI`] that started it.
#[derive(Debug, Default)]
pub struct MockSpinner {
    state: Rc<RefCell<MockSpinnerState>>,
}

impl MockSpinner {
    /// Tag the spinner was started with.
    pub fn tag(&self) -> Option<Tag> {
        self.state.borrow().tag
    }

    /// Starting message followed by every update.
    pub fn messages(&self) -> Vec<String> {
        self.state.borrow().messages.clone()
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<String> {
        self.state.borrow().finish_message.clone()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.state.borrow().status
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        let mut state = self.state.borrow_mut();
        state.finish_message = Some(msg.to_string());
        state.status = Some(status);
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.state.borrow_mut().messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Skipped, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_output_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("boom");

        assert!(ui.has_message("hello"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("boom"));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn status_lines_keep_their_tag() {
        let mut ui = MockUI::new();
        ui.status(Tag::Remove, "Uninstalling thornhill...");

        assert!(ui.has_status(Tag::Remove, "thornhill"));
        assert!(!ui.has_status(Tag::Install, "thornhill"));
        assert_eq!(ui.statuses().len(), 1);
    }

    #[test]
    fn spinner_outcome_is_visible_through_ui() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner(Tag::Install, "Building hermes...");
        spinner.set_message("linking");
        spinner.finish_error("Building hermes failed");

        let spinners = ui.spinners();
        assert_eq!(spinners.len(), 1);
        assert_eq!(spinners[0].tag(), Some(Tag::Install));
        assert_eq!(spinners[0].messages(), vec!["Building hermes...", "linking"]);
        assert_eq!(spinners[0].status(), Some(SpinnerStatus::Error));
        assert_eq!(
            spinners[0].finish_message().as_deref(),
            Some("Building hermes failed")
        );
    }

    #[test]
    fn with_mode_sets_mode() {
        let ui = MockUI::with_mode(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
