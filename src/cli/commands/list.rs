//! List command implementation.
//!
//! The `rvprobe list` command prints the rows of a profile without probing.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::{ProbeError, Result};
use crate::profile::{ExtensionRequirement, Profile};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    args: ListArgs,
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    name: &'a str,
    required: usize,
    extensions: &'a [ExtensionRequirement],
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(args: ListArgs) -> Self {
        Self { args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

/// Label for a row's mask: `bit N` for single bits, hex otherwise.
pub fn mask_label(bit_mask: u64) -> String {
    if bit_mask.count_ones() == 1 {
        format!("bit {}", bit_mask.trailing_zeros())
    } else {
        format!("{:#x}", bit_mask)
    }
}

/// Format one row of the table listing.
pub fn format_row(row: &ExtensionRequirement) -> String {
    let kind = if row.required { "required" } else { "optional" };
    let gate = if row.is_gated() {
        format!("since {}", row.introduced_at)
    } else {
        String::new()
    };
    format!(
        "  {:<10} {:<7} {:<8} {}",
        row.display_name,
        mask_label(row.bit_mask),
        kind,
        gate
    )
    .trim_end()
    .to_string()
}

fn show_profile(ui: &mut dyn UserInterface, profile: &Profile) {
    let total = profile.requirements().len();
    let required = profile.required_count();
    ui.show_header(&format!(
        "{} ({} required, {} optional)",
        profile.name(),
        required,
        total - required
    ));

    if total == 0 {
        ui.message("  No extensions listed");
        return;
    }
    for row in profile.requirements() {
        ui.message(&format_row(row));
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let profile = self.args.profile.load()?;

        if self.args.json {
            let output = ListOutput {
                name: profile.name(),
                required: profile.required_count(),
                extensions: profile.requirements(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
        } else {
            show_profile(ui, &profile);
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hwprobe::Extension;
    use crate::profile::BuiltinProfile;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn list_args(which: BuiltinProfile) -> ListArgs {
        let mut args = ListArgs::default();
        args.profile.profile = which;
        args
    }

    #[test]
    fn mask_label_single_and_multi_bit() {
        assert_eq!(mask_label(1 << 3), "bit 3");
        assert_eq!(mask_label(0b11 << 4), "0x30");
    }

    #[test]
    fn format_row_shows_gate() {
        let row = ExtensionRequirement::required(Extension::Zicbop).since(6, 19);
        let line = format_row(&row);
        assert!(line.contains("Zicbop"));
        assert!(line.contains("required"));
        assert!(line.ends_with("since 6.19"));
    }

    #[test]
    fn format_row_without_gate_has_no_trailing_space() {
        let row = ExtensionRequirement::optional(Extension::Zbc);
        let line = format_row(&row);
        assert!(line.ends_with("optional"));
    }

    #[test]
    fn list_rva23() {
        let mut ui = MockUI::new();
        let result = ListCommand::new(list_args(BuiltinProfile::Rva23))
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["rva23 (35 required, 28 optional)"]);
        assert_eq!(ui.messages().len(), 63);
        assert!(ui.messages()[0].contains("F and D"));
    }

    #[test]
    fn list_ungated_has_no_gates() {
        let mut ui = MockUI::new();
        ListCommand::new(list_args(BuiltinProfile::Rva23Ungated))
            .execute(&mut ui)
            .unwrap();
        assert!(!ui.has_message("since"));
    }

    #[test]
    fn list_json() {
        let mut ui = MockUI::new();
        let mut args = list_args(BuiltinProfile::Zba);
        args.json = true;
        ListCommand::new(args).execute(&mut ui).unwrap();

        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["name"], "zba");
        assert_eq!(json["required"], 0);
        assert_eq!(json["extensions"][0]["display_name"], "Zba");
    }

    #[test]
    fn list_empty_profile_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "extensions: []\n").unwrap();

        let mut ui = MockUI::new();
        let mut args = ListArgs::default();
        args.profile.profile_file = Some(path);
        ListCommand::new(args).execute(&mut ui).unwrap();

        assert_eq!(ui.headers(), &["empty (0 required, 0 optional)"]);
        assert!(ui.has_message("No extensions listed"));
    }
}
