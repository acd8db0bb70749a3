//! Kernel release retrieval.

use std::io;

/// Return the running kernel's release string (`uname -r`).
#[cfg(unix)]
pub fn current_release() -> io::Result<String> {
    use std::ffi::CStr;

    // SAFETY: utsname is plain old data; an all-zero value is valid.
    let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
    // SAFETY: uname only writes into the struct we pass it.
    if unsafe { libc::uname(&mut uts) } != 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: the kernel NUL-terminates every utsname field.
    let release = unsafe { CStr::from_ptr(uts.release.as_ptr()) };
    Ok(release.to_string_lossy().into_owned())
}

#[cfg(not(unix))]
pub fn current_release() -> io::Result<String> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "kernel release is only available on Unix systems",
    ))
}
