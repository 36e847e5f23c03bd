//! Win32 implementation of the primitive window operations that
//! reversible mutations are built from.

use std::ffi::c_void;
use std::mem;

use swiper_core::Rect;
use swiper_core::mutation::{Effect, Visibility, WindowOps};
use windows::Win32::Graphics::Dwm::{
    DWMWA_SYSTEMBACKDROP_TYPE, DWMWA_TRANSITIONS_FORCEDISABLED, DWMWA_USE_IMMERSIVE_DARK_MODE,
    DWMWINDOWATTRIBUTE, DwmGetWindowAttribute, DwmSetWindowAttribute,
};
use windows::Win32::Graphics::Gdi::{
    RDW_ALLCHILDREN, RDW_ERASE, RDW_FRAME, RDW_INVALIDATE, RDW_UPDATENOW, RedrawWindow,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_STYLE, IsWindowVisible, SW_HIDE, SW_SHOWNA, SWP_FRAMECHANGED, SWP_NOACTIVATE,
    SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SetWindowLongPtrW, SetWindowPos, ShowWindow,
};

use crate::window::Window;

/// Window operations backed by user32 and dwmapi.
///
/// Every call is best effort: a window may close halfway through a
/// transition, and restoring the others must still go ahead.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Ops;

// Undocumented attributes, not exported by the bindings.
const DWMWA_BYPASS_COMPOSITOR: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(22);
const DWMWA_MICA_EFFECT: DWMWINDOWATTRIBUTE = DWMWINDOWATTRIBUTE(1029);

fn attribute(effect: Effect) -> DWMWINDOWATTRIBUTE {
    match effect {
        Effect::Transitions => DWMWA_TRANSITIONS_FORCEDISABLED,
        Effect::DarkMode => DWMWA_USE_IMMERSIVE_DARK_MODE,
        Effect::Backdrop => DWMWA_SYSTEMBACKDROP_TYPE,
        Effect::BypassCompositor => DWMWA_BYPASS_COMPOSITOR,
        Effect::Mica => DWMWA_MICA_EFFECT,
    }
}

impl WindowOps for Win32Ops {
    fn style(&self, hwnd: usize) -> u32 {
        Window::from_raw(hwnd).style()
    }

    fn set_style(&self, hwnd: usize, style: u32) {
        let hwnd = Window::from_raw(hwnd).hwnd();
        // SAFETY: writing GWL_STYLE then asking for a frame recalculation;
        // position, size and Z order are left untouched.
        unsafe {
            SetWindowLongPtrW(hwnd, GWL_STYLE, style as isize);
            let _ = SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            );
        }
    }

    fn redraw(&self, hwnd: usize) {
        // SAFETY: forces a synchronous repaint of frame and children.
        unsafe {
            let _ = RedrawWindow(
                Some(Window::from_raw(hwnd).hwnd()),
                None,
                None,
                RDW_INVALIDATE | RDW_UPDATENOW | RDW_FRAME | RDW_ERASE | RDW_ALLCHILDREN,
            );
        }
    }

    fn rect(&self, hwnd: usize) -> Option<Rect> {
        Window::from_raw(hwnd).outer_rect().ok()
    }

    fn pin(&self, hwnd: usize, rect: Rect) {
        // SAFETY: re-applies the window's own rectangle.
        let result = unsafe {
            SetWindowPos(
                Window::from_raw(hwnd).hwnd(),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        };
        if let Err(e) = result {
            swiper_core::log_debug!("SetWindowPos 0x{hwnd:X} failed: {e}");
        }
    }

    fn is_visible(&self, hwnd: usize) -> bool {
        // SAFETY: simple query.
        unsafe { IsWindowVisible(Window::from_raw(hwnd).hwnd()).as_bool() }
    }

    fn set_visibility(&self, hwnd: usize, visibility: Visibility) {
        // SW_SHOWNA keeps the current placement, so maximized windows stay maximized.
        let cmd = match visibility {
            Visibility::ShowNoActivate => SW_SHOWNA,
            Visibility::Hide => SW_HIDE,
        };
        // SAFETY: ShowWindow returns the previous visibility, not an error.
        unsafe {
            let _ = ShowWindow(Window::from_raw(hwnd).hwnd(), cmd);
        }
    }

    fn effect(&self, hwnd: usize, effect: Effect) -> Option<u32> {
        let mut value: u32 = 0;
        // SAFETY: DWM writes at most four bytes into `value`.
        unsafe {
            DwmGetWindowAttribute(
                Window::from_raw(hwnd).hwnd(),
                attribute(effect),
                &mut value as *mut u32 as *mut c_void,
                mem::size_of::<u32>() as u32,
            )
        }
        .ok()?;
        Some(value)
    }

    fn set_effect(&self, hwnd: usize, effect: Effect, value: u32) {
        // SAFETY: DWM reads four bytes from `value`.
        let result = unsafe {
            DwmSetWindowAttribute(
                Window::from_raw(hwnd).hwnd(),
                attribute(effect),
                &value as *const u32 as *const c_void,
                mem::size_of::<u32>() as u32,
            )
        };
        if let Err(e) = result {
            swiper_core::log_debug!("DwmSetWindowAttribute {effect:?} on 0x{hwnd:X} failed: {e}");
        }
    }
}
