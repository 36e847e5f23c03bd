use std::mem;

use swiper_core::{MonitorInfo, Point, Rect, WindowResult};
use windows::Win32::Foundation::{LPARAM, POINT, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITORINFO,
    MonitorFromPoint,
};
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};
use windows::core::BOOL;

/// `MONITORINFOF_PRIMARY`
const PRIMARY_FLAG: u32 = 0x1;

/// A connected display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    /// `HMONITOR` value.
    pub id: usize,
    /// Full monitor rectangle.
    pub bounds: Rect,
    /// Bounds minus the taskbar and docked toolbars.
    pub work_area: Rect,
    pub primary: bool,
}

impl Display {
    pub fn info(&self) -> MonitorInfo {
        MonitorInfo {
            id: self.id,
            work_area: self.work_area,
        }
    }
}

/// Opts into per-monitor DPI awareness (V2).
///
/// Without it, window rectangles and capture sizes are scaled against the
/// primary monitor's DPI and slides on mixed-DPI setups come out blurry
/// and misaligned. Call once before any window is created.
pub fn enable_per_monitor_dpi() {
    // SAFETY: fails harmlessly if the manifest already set awareness.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}

/// Lists every connected display in enumeration order.
pub fn enumerate_displays() -> WindowResult<Vec<Display>> {
    let mut handles: Vec<HMONITOR> = Vec::new();

    // SAFETY: the callback only runs during this call, while `handles` is alive.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(collect_monitor),
            LPARAM(&mut handles as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err("EnumDisplayMonitors failed".into());
    }

    handles.into_iter().map(display_for).collect()
}

/// The monitor containing a point, or the nearest one.
pub fn monitor_from_point(point: Point) -> Option<usize> {
    let pt = POINT {
        x: point.x,
        y: point.y,
    };
    // SAFETY: simple query.
    let monitor = unsafe { MonitorFromPoint(pt, MONITOR_DEFAULTTONEAREST) };
    (!monitor.is_invalid()).then_some(monitor.0 as usize)
}

unsafe extern "system" fn collect_monitor(
    monitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec passed by enumerate_displays.
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
    handles.push(monitor);
    BOOL(1)
}

fn display_for(monitor: HMONITOR) -> WindowResult<Display> {
    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: cbSize is set as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return Err("GetMonitorInfoW failed".into());
    }

    let to_rect = |rc: RECT| Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom);
    Ok(Display {
        id: monitor.0 as usize,
        bounds: to_rect(info.rcMonitor),
        work_area: to_rect(info.rcWork),
        primary: info.dwFlags & PRIMARY_FLAG != 0,
    })
}
