use swiper_core::{Desktop, MonitorInfo, Point, Rect, Window as _};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{GetCursorPos, GetForegroundWindow};

use crate::enumerate;
use crate::monitor;
use crate::window::Window;

/// The live Win32 desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Desktop;

impl Win32Desktop {
    pub fn new() -> Self {
        Self
    }
}

impl Desktop for Win32Desktop {
    fn monitors(&self) -> Vec<MonitorInfo> {
        match monitor::enumerate_displays() {
            Ok(displays) => displays.iter().map(|d| d.info()).collect(),
            Err(e) => {
                swiper_core::log_error!("Failed to enumerate monitors: {e}");
                Vec::new()
            }
        }
    }

    fn monitor_at(&self, point: Point) -> Option<usize> {
        monitor::monitor_from_point(point)
    }

    fn cursor_position(&self) -> Option<Point> {
        let mut pt = POINT::default();
        // SAFETY: GetCursorPos writes into the POINT we own.
        unsafe { GetCursorPos(&mut pt) }.ok()?;
        Some(Point::new(pt.x, pt.y))
    }

    fn foreground_window(&self) -> Option<usize> {
        // SAFETY: simple query.
        let hwnd = unsafe { GetForegroundWindow() };
        (!hwnd.is_invalid()).then_some(hwnd.0 as usize)
    }

    fn top_level_windows(&self) -> Vec<usize> {
        enumerate::top_level_windows().unwrap_or_else(|e| {
            swiper_core::log_error!("Failed to enumerate windows: {e}");
            Vec::new()
        })
    }

    fn window_rect(&self, hwnd: usize) -> Option<Rect> {
        Window::from_raw(hwnd).rect().ok()
    }

    fn is_switchable(&self, hwnd: usize) -> bool {
        Window::from_raw(hwnd).is_switchable()
    }

    fn focus(&self, hwnd: usize) {
        Window::from_raw(hwnd).set_foreground();
    }
}
