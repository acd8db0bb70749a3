//! YAML profile files.
//!
//! ```yaml
//! name: my-board
//! extensions:
//!   - extension: zba
//!   - extension: zicbop
//!     since: "6.19"
//!   - bit: 40
//!     name: Zve64f
//!     required: false
//! ```
//!
//! Rows keep file order. `required` defaults to `true`; `since` is a kernel
//! release string and defaults to "always introduced".

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use super::{ExtensionRequirement, Profile};
use crate::error::{ProbeError, Result};
use crate::hwprobe::Extension;
use crate::kernel::KernelVersion;

/// Root of a profile file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    /// Profile name (defaults to the file stem)
    #[serde(default)]
    pub name: Option<String>,

    /// Requirement rows, in evaluation order
    #[serde(default)]
    pub extensions: Vec<ExtensionEntry>,
}

/// One row of a profile file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionEntry {
    /// Known extension identifier (e.g. "zba")
    #[serde(default)]
    pub extension: Option<String>,

    /// Raw bit index within IMA_EXT_0
    #[serde(default)]
    pub bit: Option<u32>,

    /// Display name override
    #[serde(default)]
    pub name: Option<String>,

    /// Whether a missing bit fails the profile
    #[serde(default = "default_required")]
    pub required: bool,

    /// First kernel release able to report the bit
    #[serde(default)]
    pub since: Option<String>,
}

fn default_required() -> bool {
    true
}

/// Read, parse, and validate a profile file.
pub fn load_profile(path: &Path) -> Result<Profile> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ProbeError::ProfileNotFound {
            path: path.to_path_buf(),
        },
        _ => ProbeError::Io(e),
    })?;

    let file: ProfileFile =
        serde_yaml::from_str(&content).map_err(|e| ProbeError::ProfileParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let default_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "custom".to_string());

    let profile = build_profile(file, &default_name)?;
    tracing::debug!(
        "Loaded profile '{}' with {} rows from {}",
        profile.name(),
        profile.requirements().len(),
        path.display()
    );
    Ok(profile)
}

/// Validate a parsed file and turn it into a [`Profile`].
pub fn build_profile(file: ProfileFile, default_name: &str) -> Result<Profile> {
    let name = file
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default_name.to_string());

    let mut rows: Vec<ExtensionRequirement> = Vec::with_capacity(file.extensions.len());
    for (index, entry) in file.extensions.into_iter().enumerate() {
        let row = entry_to_requirement(entry, index)?;
        if let Some(first) = rows.iter().find(|r| r.bit_mask == row.bit_mask) {
            tracing::warn!(
                "Profile '{}' lists bit mask {:#x} again as '{}'; keeping '{}'",
                name,
                row.bit_mask,
                row.display_name,
                first.display_name
            );
            continue;
        }
        rows.push(row);
    }

    Ok(Profile::new(name, rows))
}

fn entry_to_requirement(entry: ExtensionEntry, index: usize) -> Result<ExtensionRequirement> {
    let invalid = |message: String| ProbeError::ProfileValidationError {
        message: format!("extension #{}: {}", index + 1, message),
    };

    let (bit_mask, known_name) = match (&entry.extension, entry.bit) {
        (Some(ident), None) => {
            let ext: Extension = ident.parse().map_err(invalid)?;
            (ext.mask(), Some(ext.display_name()))
        }
        (None, Some(bit)) => {
            if bit > 63 {
                return Err(invalid(format!("bit {} is outside IMA_EXT_0 (0-63)", bit)));
            }
            (1u64 << bit, Extension::from_bit(bit).map(Extension::display_name))
        }
        (Some(_), Some(_)) => {
            return Err(invalid(
                "set either 'extension' or 'bit', not both".to_string(),
            ));
        }
        (None, None) => {
            return Err(invalid(
                "one of 'extension' or 'bit' is required".to_string(),
            ));
        }
    };

    let display_name = match (entry.name, known_name) {
        (Some(name), _) if !name.trim().is_empty() => name,
        (_, Some(known)) => known.to_string(),
        _ => return Err(invalid("unknown bits need a 'name'".to_string())),
    };

    let introduced_at = match entry.since {
        Some(since) => KernelVersion::parse(&since)
            .map_err(|e| invalid(format!("since '{}': {}", since, e)))?,
        None => KernelVersion::OLDEST,
    };

    Ok(ExtensionRequirement::custom(bit_mask, display_name, entry.required)
        .introduced_at(introduced_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(yaml: &str) -> Result<Profile> {
        let file: ProfileFile = serde_yaml::from_str(yaml).unwrap();
        build_profile(file, "fallback")
    }

    #[test]
    fn parses_known_extensions() {
        let profile = parse(
            r#"
name: board
extensions:
  - extension: zba
  - extension: zicbop
    since: "6.19"
  - extension: zbc
    required: false
"#,
        )
        .unwrap();

        assert_eq!(profile.name(), "board");
        let rows = profile.requirements();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].display_name, "Zba");
        assert!(rows[0].required);
        assert_eq!(rows[1].introduced_at, KernelVersion::new(6, 19));
        assert!(!rows[2].required);
    }

    #[test]
    fn raw_bits_use_known_name_when_available() {
        let profile = parse("extensions:\n  - bit: 40\n").unwrap();
        assert_eq!(profile.requirements()[0].display_name, "Zve64f");
        assert_eq!(profile.requirements()[0].bit_mask, 1 << 40);
    }

    #[test]
    fn unknown_bit_needs_a_name() {
        let err = parse("extensions:\n  - bit: 63\n").unwrap_err();
        assert!(err.to_string().contains("need a 'name'"));

        let profile = parse("extensions:\n  - bit: 63\n    name: Future\n").unwrap();
        assert_eq!(profile.requirements()[0].display_name, "Future");
    }

    #[test]
    fn name_defaults_to_fallback() {
        let profile = parse("extensions: []\n").unwrap();
        assert_eq!(profile.name(), "fallback");
        assert!(profile.requirements().is_empty());
    }

    #[test]
    fn rejects_bit_out_of_range() {
        let err = parse("extensions:\n  - bit: 64\n    name: X\n").unwrap_err();
        assert!(matches!(err, ProbeError::ProfileValidationError { .. }));
        assert!(err.to_string().contains("extension #1"));
    }

    #[test]
    fn rejects_both_extension_and_bit() {
        let err = parse("extensions:\n  - extension: zba\n    bit: 3\n").unwrap_err();
        assert!(err.to_string().contains("not both"));
    }

    #[test]
    fn rejects_row_without_selector() {
        let err = parse("extensions:\n  - required: true\n").unwrap_err();
        assert!(err.to_string().contains("is required"));
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = parse("extensions:\n  - extension: zzz\n").unwrap_err();
        assert!(err.to_string().contains("unknown extension: zzz"));
    }

    #[test]
    fn rejects_malformed_since() {
        let err = parse("extensions:\n  - extension: zba\n    since: soon\n").unwrap_err();
        assert!(err.to_string().contains("since 'soon'"));
    }

    #[test]
    fn first_definition_wins_on_duplicate_bits() {
        let profile = parse(
            r#"
extensions:
  - extension: zba
    required: false
  - bit: 3
    name: Zba-again
"#,
        )
        .unwrap();
        assert_eq!(profile.requirements().len(), 1);
        assert!(!profile.requirements()[0].required);
    }

    #[test]
    fn load_profile_reads_file_and_uses_stem() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("sbc.yml");
        fs::write(&path, "extensions:\n  - extension: v\n").unwrap();

        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.name(), "sbc");
        assert_eq!(profile.requirements()[0].display_name, "V");
    }

    #[test]
    fn load_profile_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = load_profile(&temp.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ProbeError::ProfileNotFound { .. }));
    }

    #[test]
    fn load_profile_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "extensions: [unterminated\n").unwrap();

        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, ProbeError::ProfileParseError { .. }));
        assert!(err.to_string().contains("bad.yml"));
    }

    #[test]
    fn load_profile_rejects_unknown_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("typo.yml");
        fs::write(&path, "extensions:\n  - extension: zba\n    requird: false\n").unwrap();

        let err = load_profile(&path).unwrap_err();
        assert!(matches!(err, ProbeError::ProfileParseError { .. }));
    }
}
