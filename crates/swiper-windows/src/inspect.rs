//! Read-only snapshots of desktop state for the `debug` commands.

use swiper_core::{Desktop, Point, Rect, SwitchTracker, Window as _, WindowResult};
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::WindowsAndMessaging::{GA_ROOT, GetAncestor, WindowFromPoint};

use crate::desktop::Win32Desktop;
use crate::monitor::{self, Display};
use crate::window::Window;

/// What one window looks like at the moment of sampling.
#[derive(Debug, Clone)]
pub struct WindowSummary {
    pub hwnd: usize,
    pub title: String,
    pub class: String,
    pub style: u32,
    pub rect: Option<Rect>,
    pub visible: bool,
    pub maximized: bool,
}

impl WindowSummary {
    pub fn of(hwnd: usize) -> Self {
        let window = Window::from_raw(hwnd);
        Self {
            hwnd,
            title: window.title().unwrap_or_default(),
            class: window.class().unwrap_or_default(),
            style: window.style(),
            rect: window.rect().ok(),
            visible: window.is_visible(),
            maximized: window.is_maximized(),
        }
    }
}

/// One tick of `debug spy`.
#[derive(Debug, Clone)]
pub struct SpySample {
    pub cursor: Option<Point>,
    /// Top-level window under the cursor.
    pub under_cursor: Option<WindowSummary>,
    pub foreground: Option<WindowSummary>,
    pub displays: Vec<Display>,
}

pub fn sample() -> WindowResult<SpySample> {
    let desktop = Win32Desktop::new();
    let cursor = desktop.cursor_position();
    Ok(SpySample {
        cursor,
        under_cursor: cursor.and_then(root_window_at).map(WindowSummary::of),
        foreground: desktop.foreground_window().map(WindowSummary::of),
        displays: monitor::enumerate_displays()?,
    })
}

fn root_window_at(point: Point) -> Option<usize> {
    // SAFETY: both are simple queries.
    let root = unsafe {
        let hit = WindowFromPoint(POINT {
            x: point.x,
            y: point.y,
        });
        if hit.is_invalid() {
            return None;
        }
        GetAncestor(hit, GA_ROOT)
    };
    (!root.is_invalid()).then_some(root.0 as usize)
}

/// Switchable windows per display, in the order a fresh scan finds them.
pub fn switchable_by_display() -> WindowResult<Vec<(Display, Vec<WindowSummary>)>> {
    let displays = monitor::enumerate_displays()?;
    let desktop = Win32Desktop::new();
    let mut tracker = SwitchTracker::new(displays.iter().map(Display::info).collect());
    tracker.scan(&desktop);

    Ok(displays
        .into_iter()
        .map(|display| {
            let windows = tracker
                .monitor(display.id)
                .map(|m| {
                    m.list
                        .handles()
                        .iter()
                        .copied()
                        .map(WindowSummary::of)
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default();
            (display, windows)
        })
        .collect())
}
