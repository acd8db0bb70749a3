//! Compliance report types.

use serde::Serialize;

use crate::kernel::KernelVersion;
use crate::profile::ExtensionRequirement;

use super::evaluator::first_definitions;

/// Outcome of one evaluation run.
///
/// Built once by [`evaluate`](super::evaluate) and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    /// Whether the IMA base behavior bit was reported.
    pub base_supported: bool,
    /// Raw `IMA_EXT_0` value the report was computed from.
    pub extension_bitmap: u64,
    /// Required rows whose bit was missing, in table order.
    pub failures: Vec<ExtensionRequirement>,
    /// `base_supported && failures.is_empty()`
    pub overall_pass: bool,
}

/// Which kind of result a report represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<'a> {
    /// Base and every applicable required extension present.
    Compliant,
    /// The base behavior bit was absent; extensions were not examined.
    BaseUnsupported,
    /// At least one applicable required extension was missing.
    ExtensionsMissing(&'a [ExtensionRequirement]),
}

impl ComplianceReport {
    pub fn verdict(&self) -> Verdict<'_> {
        if !self.base_supported {
            Verdict::BaseUnsupported
        } else if self.failures.is_empty() {
            Verdict::Compliant
        } else {
            Verdict::ExtensionsMissing(&self.failures)
        }
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> i32 {
        if self.overall_pass {
            0
        } else {
            1
        }
    }
}

/// Per-row status, for presenters that list every extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionState {
    /// Bit reported by the kernel.
    Supported,
    /// Required, applicable, and missing.
    Missing,
    /// Optional and missing.
    NotSupported,
    /// Missing, but the kernel predates detection of this extension.
    Skipped,
}

/// A row together with its state for one bitmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionStatus {
    pub name: String,
    pub bit_mask: u64,
    pub required: bool,
    #[serde(skip_serializing_if = "is_always_introduced")]
    pub introduced_at: KernelVersion,
    pub state: ExtensionState,
}

fn is_always_introduced(version: &KernelVersion) -> bool {
    version.is_oldest()
}

/// Classify every row of `table` against `bitmap` and `kernel`.
///
/// This is informational only; pass/fail comes from [`ComplianceReport`].
/// A repeated bit mask is listed once, under its first row, matching the
/// rows the evaluator considers.
pub fn extension_statuses(
    table: &[ExtensionRequirement],
    bitmap: u64,
    kernel: KernelVersion,
) -> Vec<ExtensionStatus> {
    first_definitions(table)
        .map(|row| {
            let state = if row.is_present(bitmap) {
                ExtensionState::Supported
            } else if !row.applies_to(kernel) {
                ExtensionState::Skipped
            } else if row.required {
                ExtensionState::Missing
            } else {
                ExtensionState::NotSupported
            };
            ExtensionStatus {
                name: row.display_name.to_string(),
                bit_mask: row.bit_mask,
                required: row.required,
                introduced_at: row.introduced_at,
                state,
            }
        })
        .collect()
}
