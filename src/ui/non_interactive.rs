//! Plain-text UI for pipes, CI logs, and machine-readable output.

use super::{OutputMode, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Writes lines verbatim, without icons or colors, so scripts can match
/// them exactly. Messages and successes go to stdout; warnings and errors
/// go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractiveUI {
    mode: OutputMode,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
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
        println!("{}", msg);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", msg);
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", title);
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
