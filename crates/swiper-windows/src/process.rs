use swiper_core::WindowResult;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_TERMINATE, TerminateProcess,
};

/// Checks whether a process with the given PID is still alive.
///
/// Used to detect stale PID files left behind when the daemon died
/// without a clean shutdown.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: least-privilege open, closed immediately.
    match unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) } {
        Ok(handle) => {
            // SAFETY: the handle was opened just above.
            unsafe {
                let _ = CloseHandle(handle);
            }
            true
        }
        Err(_) => false,
    }
}

/// Forcefully ends a process. Last resort when the daemon ignores `stop`.
pub fn kill_process(pid: u32) -> WindowResult<()> {
    // SAFETY: the handle is closed on every path below.
    let handle = unsafe { OpenProcess(PROCESS_TERMINATE, false, pid)? };
    // SAFETY: `handle` carries PROCESS_TERMINATE.
    let result = unsafe { TerminateProcess(handle, 1) };
    // SAFETY: closed exactly once.
    unsafe {
        let _ = CloseHandle(handle);
    }
    result?;
    Ok(())
}
