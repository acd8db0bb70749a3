//! Check command implementation.
//!
//! The `rvprobe check` command probes the kernel, evaluates the selected
//! profile, and prints the verdict. It is also what runs when no subcommand
//! is given.

use std::io;

use serde::Serialize;

use crate::cli::args::CheckArgs;
use crate::compliance::{
    extension_statuses, ComplianceReport, Evaluator, ExtensionStatus, ScanPolicy,
};
use crate::error::{ProbeError, Result};
use crate::hwprobe::{probe_values, CapabilitySource, ProbeValues, RecordedSource, SystemSource};
use crate::kernel::{current_release, KernelVersion};
use crate::profile::Profile;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_bitmap, show_extension_status, show_report};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
    source: Box<dyn CapabilitySource>,
    read_release: fn() -> io::Result<String>,
}

/// Machine-readable result of one check.
#[derive(Debug, Serialize)]
struct CheckOutput<'a> {
    profile: &'a str,
    kernel_release: Option<&'a str>,
    kernel_version: Option<KernelVersion>,
    probe: ProbeValues,
    report: &'a ComplianceReport,
    extensions: Vec<ExtensionStatus>,
}

impl CheckCommand {
    /// Create a new check command.
    ///
    /// Recorded values in `args` replace the syscall.
    pub fn new(args: CheckArgs) -> Self {
        let source: Box<dyn CapabilitySource> = match args.recorded_values() {
            Some((base_behavior, ima_ext_0)) => {
                Box::new(RecordedSource::new(base_behavior, ima_ext_0))
            }
            None => Box::new(SystemSource::new()),
        };
        Self::with_source(args, source)
    }

    /// Create a check command reading from a specific source.
    pub fn with_source(args: CheckArgs, source: Box<dyn CapabilitySource>) -> Self {
        Self {
            args,
            source,
            read_release: current_release,
        }
    }

    /// Replace how the running kernel's release is read.
    ///
    /// Only consulted when `--kernel-release` is not given.
    pub fn with_release_reader(mut self, read_release: fn() -> io::Result<String>) -> Self {
        self.read_release = read_release;
        self
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    fn policy(&self) -> ScanPolicy {
        if self.args.stop_at_first_failure {
            ScanPolicy::StopAtFirstFailure
        } else {
            ScanPolicy::CollectAll
        }
    }

    fn kernel_release(&self) -> Option<String> {
        if let Some(release) = &self.args.kernel_release {
            return Some(release.clone());
        }
        match (self.read_release)() {
            Ok(release) => Some(release),
            Err(e) => {
                tracing::warn!("Cannot read kernel release: {}", e);
                None
            }
        }
    }

    fn show_details(
        &self,
        ui: &mut dyn UserInterface,
        profile: &Profile,
        report: &ComplianceReport,
        kernel: KernelVersion,
    ) {
        ui.show_header(&format!(
            "Profile {} ({} required of {})",
            profile.name(),
            profile.required_count(),
            profile.requirements().len()
        ));
        show_bitmap(ui, report);
        for status in extension_statuses(profile.requirements(), report.extension_bitmap, kernel) {
            show_extension_status(ui, &status);
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let profile = self.args.profile.load()?;
        let mode = ui.output_mode();

        let release = self.kernel_release();
        let kernel = release
            .as_deref()
            .map(KernelVersion::from_release_or_oldest)
            .unwrap_or(KernelVersion::OLDEST);
        tracing::debug!(
            "Checking profile '{}' ({} rows) against kernel {}",
            profile.name(),
            profile.requirements().len(),
            kernel
        );

        if !self.args.json && mode.shows_context() {
            match &release {
                Some(release) => ui.message(&format!("Kernel release {}", release)),
                None => ui.warning("Kernel release unknown; version-gated extensions skipped"),
            }
        }

        let values = probe_values(self.source.as_ref())?;
        let report = Evaluator::new(self.policy()).evaluate(
            values.base_behavior,
            values.ima_ext_0,
            kernel,
            profile.requirements(),
        );
        tracing::debug!(
            "Profile '{}' on kernel {}: {} failure(s), pass={}",
            profile.name(),
            kernel,
            report.failures.len(),
            report.overall_pass
        );

        if self.args.json {
            let output = CheckOutput {
                profile: profile.name(),
                kernel_release: release.as_deref(),
                kernel_version: (!kernel.is_oldest()).then_some(kernel),
                probe: values,
                report: &report,
                extensions: extension_statuses(
                    profile.requirements(),
                    report.extension_bitmap,
                    kernel,
                ),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
        } else {
            if mode.shows_details() && report.base_supported {
                self.show_details(ui, &profile, &report, kernel);
            }
            show_report(ui, &report);
        }

        Ok(if report.overall_pass {
            CommandResult::success()
        } else {
            CommandResult::failure(report.exit_code())
        })
    }
}
