//! Raw `riscv_hwprobe` keys and bit values.
//!
//! Everything that mirrors `<asm/hwprobe.h>` lives here. New extensions only
//! need a line in the `extensions!` list below.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Key naming one attribute category of the `riscv_hwprobe` syscall.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CapabilityKey(pub i64);

impl CapabilityKey {
    /// `RISCV_HWPROBE_KEY_BASE_BEHAVIOR`
    pub const BASE_BEHAVIOR: CapabilityKey = CapabilityKey(3);
    /// `RISCV_HWPROBE_KEY_IMA_EXT_0`
    pub const IMA_EXT_0: CapabilityKey = CapabilityKey(4);
    /// Written back by the kernel for keys it does not recognise.
    pub const UNKNOWN: CapabilityKey = CapabilityKey(-1);

    pub fn name(self) -> &'static str {
        match self {
            Self::BASE_BEHAVIOR => "BASE_BEHAVIOR",
            Self::IMA_EXT_0 => "IMA_EXT_0",
            Self::UNKNOWN => "UNKNOWN",
            _ => "OTHER",
        }
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

/// `RISCV_HWPROBE_BASE_BEHAVIOR_IMA`: the rv32ima/rv64ima user ABI is present.
pub const BASE_BEHAVIOR_IMA: u64 = 1 << 0;

macro_rules! extensions {
    ($($variant:ident = $bit:literal => $ident:literal, $display:literal;)+) => {
        /// One bit of the `RISCV_HWPROBE_KEY_IMA_EXT_0` bitmap.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum Extension {
            $($variant = $bit,)+
        }

        impl Extension {
            /// Every known extension, in bit order.
            pub const ALL: &'static [Extension] = &[$(Extension::$variant,)+];

            /// Lowercase identifier used in profile files (`"zba"`).
            pub const fn ident(self) -> &'static str {
                match self {
                    $(Extension::$variant => $ident,)+
                }
            }

            /// Human-readable name used in reports (`"Zba"`).
            pub const fn display_name(self) -> &'static str {
                match self {
                    $(Extension::$variant => $display,)+
                }
            }
        }
    };
}

extensions! {
    Fd = 0 => "fd", "F and D";
    C = 1 => "c", "C";
    V = 2 => "v", "V";
    Zba = 3 => "zba", "Zba";
    Zbb = 4 => "zbb", "Zbb";
    Zbs = 5 => "zbs", "Zbs";
    Zicboz = 6 => "zicboz", "Zicboz";
    Zbc = 7 => "zbc", "Zbc";
    Zbkb = 8 => "zbkb", "Zbkb";
    Zbkc = 9 => "zbkc", "Zbkc";
    Zbkx = 10 => "zbkx", "Zbkx";
    Zknd = 11 => "zknd", "Zknd";
    Zkne = 12 => "zkne", "Zkne";
    Zknh = 13 => "zknh", "Zknh";
    Zksed = 14 => "zksed", "Zksed";
    Zksh = 15 => "zksh", "Zksh";
    Zkt = 16 => "zkt", "Zkt";
    Zvbb = 17 => "zvbb", "Zvbb";
    Zvbc = 18 => "zvbc", "Zvbc";
    Zvkb = 19 => "zvkb", "Zvkb";
    Zvkg = 20 => "zvkg", "Zvkg";
    Zvkned = 21 => "zvkned", "Zvkned";
    Zvknha = 22 => "zvknha", "Zvknha";
    Zvknhb = 23 => "zvknhb", "Zvknhb";
    Zvksed = 24 => "zvksed", "Zvksed";
    Zvksh = 25 => "zvksh", "Zvksh";
    Zvkt = 26 => "zvkt", "Zvkt";
    Zfh = 27 => "zfh", "Zfh";
    Zfhmin = 28 => "zfhmin", "Zfhmin";
    Zihintntl = 29 => "zihintntl", "Zihintntl";
    Zvfh = 30 => "zvfh", "Zvfh";
    Zvfhmin = 31 => "zvfhmin", "Zvfhmin";
    Zfa = 32 => "zfa", "Zfa";
    Ztso = 33 => "ztso", "Ztso";
    Zacas = 34 => "zacas", "Zacas";
    Zicond = 35 => "zicond", "Zicond";
    Zihintpause = 36 => "zihintpause", "Zihintpause";
    Zve32x = 37 => "zve32x", "Zve32x";
    Zve32f = 38 => "zve32f", "Zve32f";
    Zve64x = 39 => "zve64x", "Zve64x";
    Zve64f = 40 => "zve64f", "Zve64f";
    Zve64d = 41 => "zve64d", "Zve64d";
    Zimop = 42 => "zimop", "Zimop";
    Zca = 43 => "zca", "Zca";
    Zcb = 44 => "zcb", "Zcb";
    Zcd = 45 => "zcd", "Zcd";
    Zcf = 46 => "zcf", "Zcf";
    Zcmop = 47 => "zcmop", "Zcmop";
    Zawrs = 48 => "zawrs", "Zawrs";
    Supm = 49 => "supm", "Supm";
    Zicntr = 50 => "zicntr", "Zicntr";
    Zihpm = 51 => "zihpm", "Zihpm";
    Zfbfmin = 52 => "zfbfmin", "Zfbfmin";
    Zvfbfmin = 53 => "zvfbfmin", "Zvfbfmin";
    Zvfbfwma = 54 => "zvfbfwma", "Zvfbfwma";
    Zicbom = 55 => "zicbom", "Zicbom";
    Zaamo = 56 => "zaamo", "Zaamo";
    Zalrsc = 57 => "zalrsc", "Zalrsc";
    Zabha = 58 => "zabha", "Zabha";
    Zalasr = 59 => "zalasr", "Zalasr";
    Zicbop = 60 => "zicbop", "Zicbop";
    Zilsd = 61 => "zilsd", "Zilsd";
    Zclsd = 62 => "zclsd", "Zclsd";
}

impl Extension {
    /// Bit index within `IMA_EXT_0`.
    pub const fn bit(self) -> u32 {
        self as u32
    }

    /// Single-bit mask within `IMA_EXT_0`.
    pub const fn mask(self) -> u64 {
        1u64 << self.bit()
    }

    /// Look up the extension occupying `bit`, if any is known.
    pub fn from_bit(bit: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|ext| ext.bit() == bit)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Extension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|ext| ext.ident() == wanted)
            .ok_or_else(|| format!("unknown extension: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_keys_match_kernel_abi() {
        assert_eq!(CapabilityKey::BASE_BEHAVIOR.0, 3);
        assert_eq!(CapabilityKey::IMA_EXT_0.0, 4);
        assert_eq!(BASE_BEHAVIOR_IMA, 1);
    }

    #[test]
    fn key_display_includes_name_and_value() {
        assert_eq!(CapabilityKey::IMA_EXT_0.to_string(), "IMA_EXT_0 (4)");
        assert_eq!(CapabilityKey(99).to_string(), "OTHER (99)");
    }

    #[test]
    fn bits_are_dense_and_in_order() {
        for (index, ext) in Extension::ALL.iter().enumerate() {
            assert_eq!(ext.bit() as usize, index, "{} is out of place", ext);
        }
        assert_eq!(Extension::ALL.len(), 63);
    }

    #[test]
    fn masks_match_header_values() {
        assert_eq!(Extension::Fd.mask(), 1 << 0);
        assert_eq!(Extension::Zba.mask(), 1 << 3);
        assert_eq!(Extension::Zfa.mask(), 1 << 32);
        assert_eq!(Extension::Supm.mask(), 1 << 49);
        assert_eq!(Extension::Zicbop.mask(), 1 << 60);
        assert_eq!(Extension::Zclsd.mask(), 1 << 62);
    }

    #[test]
    fn masks_are_unique() {
        let combined = Extension::ALL.iter().fold(0u64, |acc, ext| {
            assert_eq!(acc & ext.mask(), 0, "{} overlaps", ext);
            acc | ext.mask()
        });
        assert_eq!(combined, (1u64 << 63) - 1);
    }

    #[test]
    fn from_bit_round_trips() {
        assert_eq!(Extension::from_bit(3), Some(Extension::Zba));
        assert_eq!(Extension::from_bit(63), None);
    }

    #[test]
    fn parses_identifiers_case_insensitively() {
        assert_eq!("zba".parse::<Extension>(), Ok(Extension::Zba));
        assert_eq!("Zve64d".parse::<Extension>(), Ok(Extension::Zve64d));
        assert_eq!("FD".parse::<Extension>(), Ok(Extension::Fd));
        assert!("zzz".parse::<Extension>().is_err());
    }

    #[test]
    fn display_uses_report_name() {
        assert_eq!(Extension::Fd.to_string(), "F and D");
        assert_eq!(Extension::Zihintpause.to_string(), "Zihintpause");
    }
}
