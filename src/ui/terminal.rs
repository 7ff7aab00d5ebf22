//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, ElementsTheme, NonInteractiveUI, OutputMode, ProgressSpinner,
    SpinnerHandle, Tag, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: ElementsTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            ElementsTheme::new()
        } else {
            ElementsTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        let stderr = Term::stderr();
        writeln!(&stderr, "{}", self.theme.format_error(msg)).ok();
    }

    fn status(&mut self, tag: Tag, msg: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "{}", self.theme.format_status(tag, msg)).ok();
        }
    }

    fn start_spinner(&mut self, tag: Tag, message: &str) -> Box<dyn SpinnerHandle> {
        match self.mode {
            // Build output is streamed in verbose mode; an animated line would tear it.
            OutputMode::Verbose => {
                self.status(tag, message);
                Box::new(ProgressSpinner::hidden())
            }
            OutputMode::Normal => Box::new(ProgressSpinner::new(
                &self.theme.format_status(tag, message),
                self.theme.clone(),
            )),
            OutputMode::Quiet => Box::new(ProgressSpinner::hidden()),
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
