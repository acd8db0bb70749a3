//! rvprobe - RISC-V RVA23 profile compliance checker.
//!
//! rvprobe asks the Linux kernel which ISA extensions the running hart
//! supports (via the `riscv_hwprobe` syscall) and checks the answer against
//! a requirement table such as the RVA23 application profile.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`compliance`] - The pass/fail decision and its report
//! - [`error`] - Error types and result aliases
//! - [`hwprobe`] - Capability keys, extension bits, and the syscall adapter
//! - [`kernel`] - Kernel release lookup and version parsing
//! - [`profile`] - Built-in and file-based requirement tables
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use rvprobe::compliance::evaluate;
//! use rvprobe::hwprobe::{Extension, BASE_BEHAVIOR_IMA};
//! use rvprobe::kernel::KernelVersion;
//! use rvprobe::profile::{BuiltinProfile, Profile};
//!
//! let profile = Profile::builtin(BuiltinProfile::Zba);
//! let report = evaluate(
//!     BASE_BEHAVIOR_IMA,
//!     Extension::Zba.mask(),
//!     KernelVersion::new(6, 19),
//!     profile.requirements(),
//! );
//! assert!(report.overall_pass);
//! ```

pub mod cli;
pub mod compliance;
pub mod error;
pub mod hwprobe;
pub mod kernel;
pub mod profile;
pub mod ui;

pub use error::{ProbeError, Result};
