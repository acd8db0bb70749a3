//! The compliance decision.

use std::collections::HashSet;

use crate::hwprobe::BASE_BEHAVIOR_IMA;
use crate::kernel::KernelVersion;
use crate::profile::ExtensionRequirement;

use super::report::ComplianceReport;

/// How far to scan once a required extension is found missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Report every missing required extension.
    #[default]
    CollectAll,
    /// Stop at the first missing required extension (legacy output).
    StopAtFirstFailure,
}

/// Rows of `table` whose bit mask has not appeared earlier.
///
/// When a mask repeats, only its first row is yielded.
pub fn first_definitions(
    table: &[ExtensionRequirement],
) -> impl Iterator<Item = &ExtensionRequirement> {
    let mut seen = HashSet::with_capacity(table.len());
    table.iter().filter(move |row| seen.insert(row.bit_mask))
}

/// Evaluates probe values against a requirement table.
///
/// The evaluator holds no state besides its policy; identical inputs always
/// produce identical reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    policy: ScanPolicy,
}

impl Evaluator {
    pub fn new(policy: ScanPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScanPolicy {
        self.policy
    }

    /// Decide compliance for one probe result.
    ///
    /// A row fails when it is required, its bits are all clear, and the
    /// kernel is at least `introduced_at`. When a bit mask appears more than
    /// once, only its first row counts.
    pub fn evaluate(
        &self,
        base_value: u64,
        extension_value: u64,
        kernel: KernelVersion,
        table: &[ExtensionRequirement],
    ) -> ComplianceReport {
        let base_supported = base_value & BASE_BEHAVIOR_IMA != 0;
        if !base_supported {
            return ComplianceReport {
                base_supported,
                extension_bitmap: extension_value,
                failures: Vec::new(),
                overall_pass: false,
            };
        }

        let mut failures = Vec::new();
        for row in first_definitions(table) {
            if !row.required || row.is_present(extension_value) {
                continue;
            }
            if !row.applies_to(kernel) {
                tracing::debug!(
                    "Skipping {}: kernel {} predates detection in {}",
                    row.display_name,
                    kernel,
                    row.introduced_at
                );
                continue;
            }

            failures.push(row.clone());
            if self.policy == ScanPolicy::StopAtFirstFailure {
                break;
            }
        }

        ComplianceReport {
            base_supported,
            extension_bitmap: extension_value,
            overall_pass: failures.is_empty(),
            failures,
        }
    }
}

/// Evaluate with the default collect-all policy.
pub fn evaluate(
    base_value: u64,
    extension_value: u64,
    kernel: KernelVersion,
    table: &[ExtensionRequirement],
) -> ComplianceReport {
    Evaluator::default().evaluate(base_value, extension_value, kernel, table)
}
