//! Kernel release parsing.
//!
//! A release string such as `"6.9.0-rc1"` is reduced to a [`KernelVersion`]
//! ordinal that packs the major number into the high 16 bits and the minor
//! number into the low 16 bits, so "introduced at or before" becomes a plain
//! integer comparison.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a release string could not be turned into a [`KernelVersion`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// The release string was empty.
    #[error("kernel release is empty")]
    Empty,

    /// The first field is not a plain decimal number.
    #[error("invalid major version '{0}'")]
    InvalidMajor(String),

    /// There is no second `.`-separated field.
    #[error("kernel release has no minor version")]
    MissingMinor,

    /// The second field does not start with a decimal number.
    #[error("invalid minor version '{0}'")]
    InvalidMinor(String),

    /// A field does not fit in 16 bits.
    #[error("version component {0} is out of range")]
    OutOfRange(u64),
}

/// Comparable `(major << 16) | minor` ordinal.
///
/// `KernelVersion::OLDEST` (ordinal 0) doubles as "always introduced" for
/// requirement rows and as the fallback for a release string that could not
/// be parsed. Because it compares below every real version, version-gated
/// rows are skipped rather than enforced when the kernel version is unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KernelVersion(u32);

impl KernelVersion {
    /// The oldest possible version; also the "always introduced" marker.
    pub const OLDEST: KernelVersion = KernelVersion(0);

    /// Build a version from its major and minor numbers.
    pub const fn new(major: u16, minor: u16) -> Self {
        Self(((major as u32) << 16) | minor as u32)
    }

    /// Wrap a raw packed ordinal.
    pub const fn from_ordinal(ordinal: u32) -> Self {
        Self(ordinal)
    }

    /// The packed ordinal.
    pub const fn ordinal(self) -> u32 {
        self.0
    }

    pub const fn major(self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub const fn minor(self) -> u16 {
        (self.0 & 0xffff) as u16
    }

    /// Whether this is the oldest/always-introduced sentinel.
    pub const fn is_oldest(self) -> bool {
        self.0 == 0
    }

    /// Parse a kernel release string.
    ///
    /// The major field must be entirely decimal digits. Only the leading
    /// digit run of the minor field is used, so `"6.9-rc1"` parses as 6.9.
    /// Anything after the second `.` is ignored.
    pub fn parse(release: &str) -> Result<Self, VersionParseError> {
        let release = release.trim_matches(|c: char| c.is_whitespace() || c == '\0');
        if release.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut fields = release.split('.');
        let major_field = fields.next().unwrap_or_default();
        if major_field.is_empty() || !major_field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(VersionParseError::InvalidMajor(major_field.to_string()));
        }

        let minor_field = fields.next().ok_or(VersionParseError::MissingMinor)?;
        let digits = minor_field
            .find(|c: char| !c.is_ascii_digit())
            .map_or(minor_field, |end| &minor_field[..end]);
        if digits.is_empty() {
            return Err(VersionParseError::InvalidMinor(minor_field.to_string()));
        }

        let major = component(major_field)?;
        let minor = component(digits)?;
        Ok(Self::new(major, minor))
    }

    /// Parse a release string, degrading to [`KernelVersion::OLDEST`] on failure.
    pub fn from_release_or_oldest(release: &str) -> Self {
        match Self::parse(release) {
            Ok(version) => version,
            Err(e) => {
                tracing::warn!(
                    "Cannot parse kernel release '{}' ({}); version-gated extensions will be skipped",
                    release,
                    e
                );
                Self::OLDEST
            }
        }
    }
}

fn component(digits: &str) -> Result<u16, VersionParseError> {
    // Saturate so absurdly long digit runs still report as out of range.
    let value = digits
        .bytes()
        .fold(0u64, |acc, b| acc.saturating_mul(10).saturating_add(u64::from(b - b'0')));
    u16::try_from(value).map_err(|_| VersionParseError::OutOfRange(value))
}

impl fmt::Display for KernelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

impl Serialize for KernelVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_release() {
        let v = KernelVersion::parse("6.9.0").unwrap();
        assert_eq!(v.ordinal(), (6 << 16) | 9);
        assert_eq!(v.major(), 6);
        assert_eq!(v.minor(), 9);
    }

    #[test]
    fn parses_distro_release() {
        let v = KernelVersion::parse("6.8.0-31-generic").unwrap();
        assert_eq!(v, KernelVersion::new(6, 8));
    }

    #[test]
    fn minor_suffix_is_tolerated() {
        assert_eq!(
            KernelVersion::parse("6.9-rc1").unwrap(),
            KernelVersion::new(6, 9)
        );
        assert_eq!(
            KernelVersion::parse("6.15+").unwrap(),
            KernelVersion::new(6, 15)
        );
    }

    #[test]
    fn trailing_nul_and_whitespace_are_ignored() {
        assert_eq!(
            KernelVersion::parse("6.13.2\0\0\0").unwrap(),
            KernelVersion::new(6, 13)
        );
        assert_eq!(
            KernelVersion::parse(" 6.1\n").unwrap(),
            KernelVersion::new(6, 1)
        );
    }

    #[test]
    fn newer_minor_compares_greater() {
        assert!(KernelVersion::parse("6.9").unwrap() >= KernelVersion::parse("6.8").unwrap());
        assert!(KernelVersion::new(6, 15) > KernelVersion::new(6, 9));
        assert!(KernelVersion::new(7, 0) > KernelVersion::new(6, 19));
    }

    #[test]
    fn bogus_release_is_rejected() {
        assert_eq!(
            KernelVersion::parse("bogus"),
            Err(VersionParseError::InvalidMajor("bogus".to_string()))
        );
    }

    #[test]
    fn major_with_suffix_is_rejected() {
        assert!(matches!(
            KernelVersion::parse("6rc.9"),
            Err(VersionParseError::InvalidMajor(_))
        ));
        assert!(matches!(
            KernelVersion::parse("+6.9"),
            Err(VersionParseError::InvalidMajor(_))
        ));
    }

    #[test]
    fn missing_minor_is_rejected() {
        assert_eq!(
            KernelVersion::parse("6"),
            Err(VersionParseError::MissingMinor)
        );
    }

    #[test]
    fn non_numeric_minor_is_rejected() {
        assert_eq!(
            KernelVersion::parse("6.x"),
            Err(VersionParseError::InvalidMinor("x".to_string()))
        );
        assert_eq!(
            KernelVersion::parse("6."),
            Err(VersionParseError::InvalidMinor(String::new()))
        );
    }

    #[test]
    fn empty_release_is_rejected() {
        assert_eq!(KernelVersion::parse(""), Err(VersionParseError::Empty));
        assert_eq!(KernelVersion::parse("\0\0"), Err(VersionParseError::Empty));
    }

    #[test]
    fn oversized_components_are_rejected() {
        assert_eq!(
            KernelVersion::parse("65536.0"),
            Err(VersionParseError::OutOfRange(65536))
        );
        assert!(matches!(
            KernelVersion::parse("6.99999999999999999999999"),
            Err(VersionParseError::OutOfRange(_))
        ));
        assert_eq!(
            KernelVersion::parse("65535.65535").unwrap().ordinal(),
            u32::MAX
        );
    }

    #[test]
    fn unparsable_release_degrades_to_oldest() {
        assert_eq!(
            KernelVersion::from_release_or_oldest("bogus"),
            KernelVersion::OLDEST
        );
        assert!(KernelVersion::from_release_or_oldest("").is_oldest());
        assert_eq!(
            KernelVersion::from_release_or_oldest("6.19.1"),
            KernelVersion::new(6, 19)
        );
    }

    #[test]
    fn oldest_compares_below_everything() {
        assert!(KernelVersion::OLDEST < KernelVersion::new(0, 1));
        assert_eq!(KernelVersion::default(), KernelVersion::OLDEST);
    }

    #[test]
    fn display_is_major_dot_minor() {
        assert_eq!(KernelVersion::new(6, 15).to_string(), "6.15");
        assert_eq!(
            KernelVersion::from_ordinal(0x0006_0013).to_string(),
            "6.19"
        );
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&KernelVersion::new(6, 13)).unwrap();
        assert_eq!(json, "\"6.13\"");
    }
}
