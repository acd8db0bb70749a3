//! Running-kernel information.
//!
//! - [`release`] - Reads the kernel release string via `uname(2)`
//! - [`version`] - Parses release strings into comparable [`KernelVersion`]s

pub mod release;
pub mod version;

pub use release::current_release;
pub use version::{KernelVersion, VersionParseError};
