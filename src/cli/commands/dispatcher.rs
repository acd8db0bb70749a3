//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::list::ListCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
#[derive(Debug, Default)]
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new() -> Self {
        Self
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Check(args)) => CheckCommand::new(args.clone()).execute(ui),
            Some(Commands::List(args)) => ListCommand::new(args.clone()).execute(ui),
            // Default to check with default args
            None => CheckCommand::new(CheckArgs::default()).execute(ui),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatches_list() {
        let cli = Cli::try_parse_from(["rvprobe", "list", "--profile", "zba"]).unwrap();
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new().dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.headers(), &["zba (0 required, 1 optional)"]);
    }

    #[test]
    fn dispatches_check_with_recorded_values() {
        let cli = Cli::try_parse_from([
            "rvprobe",
            "check",
            "--base-behavior",
            "0",
            "--ima-ext-0",
            "0",
            "--kernel-release",
            "6.19.0",
        ])
        .unwrap();
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new().dispatch(&cli, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("RISC-V base is NOT supported."));
    }
}
