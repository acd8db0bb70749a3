//! Compliance evaluation.
//!
//! [`evaluate`] is a pure function of the base-behavior value, the
//! `IMA_EXT_0` bitmap, the kernel version, and a requirement table. It does
//! no I/O and keeps no state between calls.
//!
//! # Example
//!
//! ```
//! use rvprobe::compliance::{evaluate, Verdict};
//! use rvprobe::hwprobe::{Extension, BASE_BEHAVIOR_IMA};
//! use rvprobe::kernel::KernelVersion;
//! use rvprobe::profile::ExtensionRequirement;
//!
//! let table = [ExtensionRequirement::required(Extension::Zba)];
//! let report = evaluate(BASE_BEHAVIOR_IMA, 0, KernelVersion::new(6, 9), &table);
//! assert!(matches!(report.verdict(), Verdict::ExtensionsMissing(_)));
//! ```

pub mod evaluator;
pub mod report;

pub use evaluator::{evaluate, first_definitions, Evaluator, ScanPolicy};
pub use report::{extension_statuses, ComplianceReport, ExtensionState, ExtensionStatus, Verdict};
