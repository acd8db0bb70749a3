//! Live `riscv_hwprobe(2)` source.

use std::io;

use super::{CapabilitySource, ProbePair};

/// `__NR_riscv_hwprobe` from the generic syscall table.
pub const SYS_RISCV_HWPROBE: i64 = 258;

/// Queries the running kernel.
///
/// Off RISC-V Linux every probe fails with [`io::ErrorKind::Unsupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSource;

impl SystemSource {
    pub fn new() -> Self {
        Self
    }
}

impl CapabilitySource for SystemSource {
    #[cfg(all(target_os = "linux", target_arch = "riscv64"))]
    fn probe(&self, pairs: &mut [ProbePair]) -> io::Result<()> {
        // SAFETY: ProbePair is #[repr(C)] and layout-compatible with
        // struct riscv_hwprobe; the kernel writes at most `pairs.len()`
        // entries. A zero cpu count with a null cpu set means "all CPUs".
        let ret = unsafe {
            libc::syscall(
                SYS_RISCV_HWPROBE as libc::c_long,
                pairs.as_mut_ptr(),
                pairs.len() as libc::size_t,
                0 as libc::size_t,
                std::ptr::null_mut::<libc::c_ulong>(),
                0 as libc::c_uint,
            )
        };
        if ret < 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    #[cfg(not(all(target_os = "linux", target_arch = "riscv64")))]
    fn probe(&self, _pairs: &mut [ProbePair]) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "riscv_hwprobe is only available on RISC-V Linux",
        ))
    }
}
