use swiper_core::WindowResult;
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

/// Every top-level window handle, front to back.
///
/// No filtering happens here; callers decide what is switchable.
pub fn top_level_windows() -> WindowResult<Vec<usize>> {
    let mut handles: Vec<usize> = Vec::new();

    // SAFETY: EnumWindows is synchronous, so the Vec outlives every callback.
    unsafe {
        EnumWindows(
            Some(collect_window),
            LPARAM(&mut handles as *mut _ as isize),
        )?;
    }

    Ok(handles)
}

unsafe extern "system" fn collect_window(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec passed by top_level_windows.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<usize>) };
    handles.push(hwnd.0 as usize);
    BOOL(1)
}
