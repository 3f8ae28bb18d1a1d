//! Host memory queries.
//!
//! The heap asks for the amount of installed memory exactly once while it is
//! being constructed, and again only when the embedder signals memory
//! pressure. A failed query reports `0`, which callers treat as the smallest
//! device class.

/// Returns total physical memory of the host in bytes, or `0` if it can't be
/// determined.
pub fn physical_memory() -> u64 {
    unsafe { physical_memory_internal() }
}

#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
))]
unsafe fn physical_memory_internal() -> u64 {
    let pages = libc::sysconf(libc::_SC_PHYS_PAGES);
    let page_size = libc::sysconf(libc::_SC_PAGESIZE);
    if pages <= 0 || page_size <= 0 {
        return 0;
    }
    (pages as u64).saturating_mul(page_size as u64)
}

#[cfg(windows)]
unsafe fn physical_memory_internal() -> u64 {
    use winapi::um::sysinfoapi::*;
    let mut status: MEMORYSTATUSEX = core::mem::MaybeUninit::zeroed().assume_init();
    status.dwLength = core::mem::size_of::<MEMORYSTATUSEX>() as u32;
    if GlobalMemoryStatusEx(&mut status) == 0 {
        return 0;
    }
    status.ullTotalPhys
}

#[cfg(not(any(
    windows,
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
)))]
unsafe fn physical_memory_internal() -> u64 {
    0
}
