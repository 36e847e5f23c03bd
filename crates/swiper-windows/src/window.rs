use std::mem;

use swiper_core::mutation::style;
use swiper_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, GetWindowLongPtrW, GetWindowRect, GetWindowTextLengthW,
    GetWindowTextW, IsWindowVisible, RealGetWindowClassW, SetForegroundWindow,
};

/// A top-level window, identified by its `HWND`.
///
/// The handle is only observed. Swiper never owns or destroys the
/// windows it switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Wraps a pointer-sized handle value as stored by the core crate.
    pub fn from_raw(handle: usize) -> Self {
        Self {
            hwnd: HWND(handle as *mut _),
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// The handle as a plain integer.
    pub fn raw(&self) -> usize {
        self.hwnd.0 as usize
    }

    /// `GWL_STYLE` bits.
    pub fn style(&self) -> u32 {
        // SAFETY: reading a window long has no side effects.
        unsafe { GetWindowLongPtrW(self.hwnd, GWL_STYLE) as u32 }
    }

    /// Outer bounds as reported by `GetWindowRect`, invisible borders included.
    ///
    /// This is the rectangle `SetWindowPos` expects back.
    pub fn outer_rect(&self) -> WindowResult<Rect> {
        let mut rc = RECT::default();
        // SAFETY: GetWindowRect writes into the RECT we own.
        unsafe { GetWindowRect(self.hwnd, &mut rc)? };
        Ok(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
    }

    /// Gives this window input focus and brings it to the front.
    pub fn set_foreground(&self) {
        // SAFETY: SetForegroundWindow only fails softly (returns FALSE).
        let ok = unsafe { SetForegroundWindow(self.hwnd).as_bool() };
        if !ok {
            swiper_core::log_warn!("SetForegroundWindow refused for 0x{:X}", self.raw());
        }
    }
}

impl swiper_core::Window for Window {
    fn title(&self) -> WindowResult<String> {
        // SAFETY: the buffer is sized from GetWindowTextLengthW plus the terminator.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length == 0 {
                return Ok(String::new());
            }
            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..copied as usize]))
        }
    }

    fn class(&self) -> WindowResult<String> {
        // SAFETY: 256 is the maximum class name length.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            Ok(String::from_utf16_lossy(&buffer[..length as usize]))
        }
    }

    /// Visible bounds from DWM, falling back to `GetWindowRect`.
    fn rect(&self) -> WindowResult<Rect> {
        let mut frame = RECT::default();
        // SAFETY: DWM writes at most size_of::<RECT>() bytes into `frame`.
        let dwm = unsafe {
            DwmGetWindowAttribute(
                self.hwnd,
                DWMWA_EXTENDED_FRAME_BOUNDS,
                &mut frame as *mut RECT as *mut _,
                mem::size_of::<RECT>() as u32,
            )
        };
        match dwm {
            Ok(()) => Ok(Rect::from_edges(
                frame.left,
                frame.top,
                frame.right,
                frame.bottom,
            )),
            Err(_) => self.outer_rect(),
        }
    }

    fn is_visible(&self) -> bool {
        // SAFETY: simple query.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    fn is_maximized(&self) -> bool {
        self.style() & style::MAXIMIZE != 0
    }
}
