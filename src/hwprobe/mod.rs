//! Capability queries against the `riscv_hwprobe` syscall.
//!
//! The syscall is reached through the [`CapabilitySource`] trait so that the
//! evaluation path can run against recorded values (or test fixtures) as
//! well as the live kernel.
//!
//! # Modules
//!
//! - [`keys`] - Raw key and bit values mirroring `<asm/hwprobe.h>`
//! - [`syscall`] - The live syscall-backed source
//!
//! # Example
//!
//! ```
//! use rvprobe::hwprobe::{probe_values, RecordedSource};
//!
//! let source = RecordedSource::new(0x1, 0x8);
//! let values = probe_values(&source).unwrap();
//! assert_eq!(values.base_behavior, 0x1);
//! assert_eq!(values.ima_ext_0, 0x8);
//! ```

pub mod keys;
pub mod syscall;

use std::collections::HashSet;
use std::io;

use serde::Serialize;

use crate::error::{ProbeError, Result};

pub use keys::{CapabilityKey, Extension, BASE_BEHAVIOR_IMA};
pub use syscall::SystemSource;

/// One `struct riscv_hwprobe` entry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbePair {
    pub key: CapabilityKey,
    pub value: u64,
}

impl ProbePair {
    /// A request for `key` with a zeroed value slot.
    pub fn request(key: CapabilityKey) -> Self {
        Self { key, value: 0 }
    }
}

/// Something that can answer `riscv_hwprobe` requests.
pub trait CapabilitySource {
    /// Fill in the `value` of every pair, in place.
    ///
    /// Implementations follow kernel semantics: a key the source does not
    /// know is rewritten to [`CapabilityKey::UNKNOWN`] with a zero value.
    fn probe(&self, pairs: &mut [ProbePair]) -> io::Result<()>;
}

/// Values of the two keys this tool evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProbeValues {
    pub base_behavior: u64,
    pub ima_ext_0: u64,
}

/// Query `keys` in order and return their values in the same order.
///
/// Keys must be unique; a repeated key is rejected before the source is
/// consulted. A key the kernel reports as unknown yields 0. Any other key
/// mismatch breaks the ordering contract and is an error.
pub fn query(source: &dyn CapabilitySource, keys: &[CapabilityKey]) -> Result<Vec<u64>> {
    let mut seen = HashSet::with_capacity(keys.len());
    if let Some(dup) = keys.iter().find(|key| !seen.insert(**key)) {
        return Err(ProbeError::DuplicateKey { key: dup.0 });
    }

    let mut pairs: Vec<ProbePair> = keys.iter().copied().map(ProbePair::request).collect();
    source
        .probe(&mut pairs)
        .map_err(|source| ProbeError::QueryFailed { source })?;

    keys.iter()
        .zip(&pairs)
        .map(|(&requested, pair)| {
            if pair.key == requested {
                tracing::debug!("hwprobe {} = {:#x}", requested, pair.value);
                Ok(pair.value)
            } else if pair.key == CapabilityKey::UNKNOWN {
                tracing::warn!("Kernel does not recognise hwprobe key {}", requested);
                Ok(0)
            } else {
                Err(ProbeError::UnexpectedKey {
                    requested: requested.0,
                    returned: pair.key.0,
                })
            }
        })
        .collect()
}

/// Query base behavior and `IMA_EXT_0`, in that order.
pub fn probe_values(source: &dyn CapabilitySource) -> Result<ProbeValues> {
    let values = query(
        source,
        &[CapabilityKey::BASE_BEHAVIOR, CapabilityKey::IMA_EXT_0],
    )?;
    Ok(ProbeValues {
        base_behavior: values[0],
        ima_ext_0: values[1],
    })
}

/// A source answering from previously recorded values.
///
/// Used to evaluate another machine's probe output offline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordedSource {
    values: ProbeValues,
}

impl RecordedSource {
    pub fn new(base_behavior: u64, ima_ext_0: u64) -> Self {
        Self {
            values: ProbeValues {
                base_behavior,
                ima_ext_0,
            },
        }
    }
}

impl CapabilitySource for RecordedSource {
    fn probe(&self, pairs: &mut [ProbePair]) -> io::Result<()> {
        for pair in pairs.iter_mut() {
            match pair.key {
                CapabilityKey::BASE_BEHAVIOR => pair.value = self.values.base_behavior,
                CapabilityKey::IMA_EXT_0 => pair.value = self.values.ima_ext_0,
                _ => {
                    pair.key = CapabilityKey::UNKNOWN;
                    pair.value = 0;
                }
            }
        }
        Ok(())
    }
}
