use std::sync::Once;

use swiper_core::{Rect, WindowResult};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, HWND_TOPMOST, LWA_ALPHA,
    RegisterClassW, SWP_NOACTIVATE, SWP_SHOWWINDOW, SetLayeredWindowAttributes, SetWindowPos,
    WM_NCHITTEST, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST,
    WS_EX_TRANSPARENT, WS_POPUP,
};
use windows::core::w;

static REGISTER_CLASS: Once = Once::new();

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(overlay_wnd_proc),
            lpszClassName: w!("SwiperOverlay"),
            ..Default::default()
        };
        // SAFETY: the class name is a static wide string.
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

unsafe extern "system" fn overlay_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCHITTEST {
        // HTTRANSPARENT
        return LRESULT(-1);
    }
    // SAFETY: forwards the arguments the system passed in.
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// The surface a slide is drawn on.
///
/// A borderless popup covering one monitor's work area: topmost, out of
/// the taskbar and Alt-Tab, never activated, and transparent to the mouse
/// so clicks during a slide land on the real windows underneath.
pub struct Overlay {
    hwnd: HWND,
    area: Rect,
}

impl Overlay {
    /// Creates the overlay over `area` and shows it without activation.
    pub fn new(area: Rect) -> WindowResult<Self> {
        ensure_class_registered();

        let ex = WS_EX_LAYERED
            | WS_EX_TRANSPARENT
            | WS_EX_TOOLWINDOW
            | WS_EX_TOPMOST
            | WS_EX_NOACTIVATE;

        // SAFETY: the class is registered above; the handle is owned by
        // the returned Overlay and destroyed in Drop.
        let hwnd = unsafe {
            CreateWindowExW(
                ex,
                w!("SwiperOverlay"),
                w!("Swiper"),
                WS_POPUP,
                area.x,
                area.y,
                area.width,
                area.height,
                None,
                None,
                None,
                None,
            )?
        };
        let overlay = Self { hwnd, area };

        // SAFETY: hwnd is the window we just created.
        unsafe {
            SetLayeredWindowAttributes(hwnd, COLORREF(0), 255, LWA_ALPHA)?;
            SetWindowPos(
                hwnd,
                Some(HWND_TOPMOST),
                area.x,
                area.y,
                area.width,
                area.height,
                SWP_NOACTIVATE | SWP_SHOWWINDOW,
            )?;
        }

        Ok(overlay)
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn area(&self) -> Rect {
        self.area
    }
}

impl Drop for Overlay {
    fn drop(&mut self) {
        // SAFETY: we own this window.
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
