//! A single row of a requirement table.

use std::borrow::Cow;

use serde::Serialize;

use crate::hwprobe::Extension;
use crate::kernel::KernelVersion;

/// One extension a profile asks about.
///
/// Rows are immutable once built. `introduced_at` is the first kernel able
/// to report the bit; [`KernelVersion::OLDEST`] means "always reportable".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionRequirement {
    /// Bit(s) within `IMA_EXT_0`; any set bit counts as present.
    pub bit_mask: u64,
    /// Name used in reports.
    pub display_name: Cow<'static, str>,
    /// Whether a missing bit fails the profile.
    pub required: bool,
    /// Oldest kernel that can report this extension.
    pub introduced_at: KernelVersion,
}

impl ExtensionRequirement {
    /// A required row for a known extension.
    pub const fn required(ext: Extension) -> Self {
        Self {
            bit_mask: ext.mask(),
            display_name: Cow::Borrowed(ext.display_name()),
            required: true,
            introduced_at: KernelVersion::OLDEST,
        }
    }

    /// An informational row for a known extension.
    pub const fn optional(ext: Extension) -> Self {
        Self {
            bit_mask: ext.mask(),
            display_name: Cow::Borrowed(ext.display_name()),
            required: false,
            introduced_at: KernelVersion::OLDEST,
        }
    }

    /// A row for an arbitrary mask, e.g. a bit this build does not name yet.
    pub fn custom(bit_mask: u64, display_name: impl Into<String>, required: bool) -> Self {
        Self {
            bit_mask,
            display_name: Cow::Owned(display_name.into()),
            required,
            introduced_at: KernelVersion::OLDEST,
        }
    }

    /// Gate this row on a minimum kernel version.
    pub const fn since(mut self, major: u16, minor: u16) -> Self {
        self.introduced_at = KernelVersion::new(major, minor);
        self
    }

    /// Gate this row on an already-built version.
    pub fn introduced_at(mut self, version: KernelVersion) -> Self {
        self.introduced_at = version;
        self
    }

    /// Drop the version gate.
    pub fn ungated(mut self) -> Self {
        self.introduced_at = KernelVersion::OLDEST;
        self
    }

    /// Whether the row carries a version gate.
    pub fn is_gated(&self) -> bool {
        !self.introduced_at.is_oldest()
    }

    /// Whether `kernel` is new enough to report this extension.
    pub fn applies_to(&self, kernel: KernelVersion) -> bool {
        kernel >= self.introduced_at
    }

    /// Whether `bitmap` reports this extension.
    pub fn is_present(&self, bitmap: u64) -> bool {
        bitmap & self.bit_mask != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_row_uses_extension_mask_and_name() {
        let row = ExtensionRequirement::required(Extension::Zba);
        assert_eq!(row.bit_mask, 1 << 3);
        assert_eq!(row.display_name, "Zba");
        assert!(row.required);
        assert!(!row.is_gated());
    }

    #[test]
    fn optional_row_is_not_required() {
        let row = ExtensionRequirement::optional(Extension::Zbc);
        assert!(!row.required);
    }

    #[test]
    fn since_sets_the_gate() {
        let row = ExtensionRequirement::required(Extension::Zicbop).since(6, 19);
        assert!(row.is_gated());
        assert_eq!(row.introduced_at.ordinal(), 0x0006_0013);
        assert!(!row.applies_to(KernelVersion::new(6, 18)));
        assert!(row.applies_to(KernelVersion::new(6, 19)));
        assert!(row.applies_to(KernelVersion::new(7, 0)));
    }

    #[test]
    fn ungated_row_applies_to_any_kernel() {
        let row = ExtensionRequirement::required(Extension::Supm)
            .since(6, 13)
            .ungated();
        assert!(row.applies_to(KernelVersion::OLDEST));
    }

    #[test]
    fn gated_row_never_applies_to_unknown_kernel() {
        let row = ExtensionRequirement::required(Extension::Zicntr).since(6, 15);
        assert!(!row.applies_to(KernelVersion::OLDEST));
    }

    #[test]
    fn presence_checks_any_bit_of_mask() {
        let row = ExtensionRequirement::custom(0b110, "pair", true);
        assert!(row.is_present(0b010));
        assert!(row.is_present(0b100));
        assert!(!row.is_present(0b001));
        assert!(!row.is_present(0));
    }

    #[test]
    fn custom_row_owns_its_name() {
        let row = ExtensionRequirement::custom(1 << 63, format!("bit{}", 63), false);
        assert_eq!(row.display_name, "bit63");
        assert!(matches!(row.display_name, Cow::Owned(_)));
    }
}
