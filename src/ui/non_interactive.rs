//! Line-oriented UI for pipes, CI and other headless runs.

use super::theme::ElementsTheme;
use super::{OutputMode, SpinnerHandle, Tag, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners become a single status line followed by the result line.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: crate::shell::is_ci(),
        }
    }

    /// Whether the process looks like it runs under CI.
    pub fn is_ci(&self) -> bool {
        self.is_ci
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("⚠ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn status(&mut self, tag: Tag, msg: &str) {
        if self.mode.shows_progress() {
            println!("{} {}", tag, msg);
        }
    }

    fn start_spinner(&mut self, tag: Tag, message: &str) -> Box<dyn SpinnerHandle> {
        self.status(tag, message);
        Box::new(LineSpinner {
            visible: self.mode.shows_progress(),
            theme: ElementsTheme::plain(),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner stand-in that prints only the outcome.
struct LineSpinner {
    visible: bool,
    theme: ElementsTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        if self.visible {
            println!("{}", self.theme.format_skipped(msg));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_mode() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn spinner_lifecycle_does_not_panic() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner(Tag::Install, "Installing hermes...");
        spinner.set_message("still going");
        spinner.finish_skipped("hermes skipped");
    }
}
