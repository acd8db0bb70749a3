//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::profile::{BuiltinProfile, Profile};

/// rvprobe - RISC-V RVA23 compliance checker.
#[derive(Debug, Parser)]
#[command(name = "rvprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Show every extension and the raw bitmap
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print failures and the verdict
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe the kernel and check a profile (default if no command specified)
    Check(CheckArgs),

    /// Show the rows of a profile
    List(ListArgs),
}

/// Profile selection shared by `check` and `list`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ProfileArgs {
    /// Built-in profile to check against
    #[arg(long, value_enum, default_value_t = BuiltinProfile::Rva23)]
    pub profile: BuiltinProfile,

    /// Load the profile from a YAML file instead
    #[arg(long, value_name = "PATH", conflicts_with = "profile")]
    pub profile_file: Option<PathBuf>,
}

impl ProfileArgs {
    /// Resolve the selected profile, reading the file if one was given.
    pub fn load(&self) -> Result<Profile> {
        match &self.profile_file {
            Some(path) => Profile::from_file(path),
            None => Ok(Profile::builtin(self.profile)),
        }
    }
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Report only the first missing extension
    #[arg(long)]
    pub stop_at_first_failure: bool,

    /// Kernel release to gate extensions on (defaults to uname)
    #[arg(long, value_name = "RELEASE")]
    pub kernel_release: Option<String>,

    /// Recorded BASE_BEHAVIOR value; skips the syscall
    #[arg(long, value_name = "HEX", value_parser = parse_hex, requires = "ima_ext_0")]
    pub base_behavior: Option<u64>,

    /// Recorded IMA_EXT_0 value; skips the syscall
    #[arg(long = "ima-ext-0", value_name = "HEX", value_parser = parse_hex, requires = "base_behavior")]
    pub ima_ext_0: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Recorded probe values, when both were given.
    pub fn recorded_values(&self) -> Option<(u64, u64)> {
        self.base_behavior.zip(self.ima_ext_0)
    }
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a hex value with or without a `0x` prefix.
pub fn parse_hex(value: &str) -> std::result::Result<u64, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
        .replace('_', "");
    u64::from_str_radix(&digits, 16).map_err(|e| format!("invalid hex value '{}': {}", value, e))
}
