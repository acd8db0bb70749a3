//! Requirement tables ("profiles").
//!
//! A [`Profile`] is an ordered, immutable list of [`ExtensionRequirement`]s.
//! Profiles come from the built-in tables or from a YAML file.
//!
//! # Modules
//!
//! - [`builtin`] - Tables compiled into the binary
//! - [`file`] - YAML profile files
//! - [`requirement`] - The per-row type

pub mod builtin;
pub mod file;
pub mod requirement;

use std::path::Path;

use clap::ValueEnum;

use crate::error::Result;

pub use requirement::ExtensionRequirement;

/// Built-in profile selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BuiltinProfile {
    /// RVA23 with kernel-version gates
    #[default]
    Rva23,
    /// RVA23 rows without kernel-version gates
    Rva23Ungated,
    /// RISC-V base plus informational Zba
    Zba,
}

impl BuiltinProfile {
    pub fn name(self) -> &'static str {
        match self {
            Self::Rva23 => "rva23",
            Self::Rva23Ungated => "rva23-ungated",
            Self::Zba => "zba",
        }
    }
}

/// A named, ordered requirement table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    requirements: Vec<ExtensionRequirement>,
}

impl Profile {
    /// Build a profile from rows, keeping their order.
    pub fn new(name: impl Into<String>, requirements: Vec<ExtensionRequirement>) -> Self {
        Self {
            name: name.into(),
            requirements,
        }
    }

    /// Materialize a built-in table.
    pub fn builtin(which: BuiltinProfile) -> Self {
        let requirements = match which {
            BuiltinProfile::Rva23 => builtin::RVA23.to_vec(),
            BuiltinProfile::Rva23Ungated => builtin::RVA23
                .iter()
                .cloned()
                .map(ExtensionRequirement::ungated)
                .collect(),
            BuiltinProfile::Zba => builtin::ZBA.to_vec(),
        };
        Self::new(which.name(), requirements)
    }

    /// Load a profile from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        file::load_profile(path)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows in table order.
    pub fn requirements(&self) -> &[ExtensionRequirement] {
        &self.requirements
    }

    pub fn required_count(&self) -> usize {
        self.requirements.iter().filter(|row| row.required).count()
    }
}
