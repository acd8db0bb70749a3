//! Shared display helpers for compliance output.
//!
//! Used by `check` to render a [`ComplianceReport`] and by `check --verbose`
//! to render one line per [`ExtensionStatus`].

use crate::compliance::{ComplianceReport, ExtensionState, ExtensionStatus, Verdict};
use crate::ui::UserInterface;

/// Return the icon string for an extension state (TTY output).
pub fn state_icon(state: ExtensionState) -> &'static str {
    match state {
        ExtensionState::Supported => "✓",
        ExtensionState::Missing => "✗",
        ExtensionState::NotSupported => "○",
        ExtensionState::Skipped => "◌",
    }
}

/// Return a bracketed symbol for an extension state (non-TTY output).
pub fn state_symbol(state: ExtensionState) -> &'static str {
    match state {
        ExtensionState::Supported => "[ok]",
        ExtensionState::Missing => "[MISSING]",
        ExtensionState::NotSupported => "[no]",
        ExtensionState::Skipped => "[skip]",
    }
}

/// Human description of one row.
pub fn describe_status(status: &ExtensionStatus) -> String {
    match status.state {
        ExtensionState::Supported => format!("{} supported", status.name),
        ExtensionState::Missing => format!("{} NOT supported", status.name),
        ExtensionState::NotSupported => format!("{} not supported (optional)", status.name),
        ExtensionState::Skipped => format!(
            "{} skipped (detected from kernel {})",
            status.name, status.introduced_at
        ),
    }
}

/// Print one row of the verbose listing.
pub fn show_extension_status(ui: &mut dyn UserInterface, status: &ExtensionStatus) {
    let marker = if ui.is_interactive() {
        state_icon(status.state)
    } else {
        state_symbol(status.state)
    };
    ui.message(&format!("  {} {}", marker, describe_status(status)));
}

/// Print the raw extension bitmap.
pub fn show_bitmap(ui: &mut dyn UserInterface, report: &ComplianceReport) {
    ui.message(&format!("IMA_EXT_0: {:#018x}", report.extension_bitmap));
}

/// Print the verdict lines for a report.
///
/// Failures are printed in table order, one per line.
pub fn show_report(ui: &mut dyn UserInterface, report: &ComplianceReport) {
    match report.verdict() {
        Verdict::BaseUnsupported => ui.error("RISC-V base is NOT supported."),
        Verdict::ExtensionsMissing(missing) => {
            for row in missing {
                ui.error(&format!("{} NOT supported", row.display_name));
            }
        }
        Verdict::Compliant => ui.success("All required extensions supported"),
    }
}
