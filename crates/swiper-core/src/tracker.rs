//! Per-monitor tracking of switchable windows and the switch decision.
//!
//! The tracker never talks to the OS directly. Everything it needs to
//! know about the desktop comes through [`Desktop`], and starting the
//! visual transition is delegated to a [`TransitionLauncher`], so the
//! whole decision path runs against in-memory fakes in tests.

use std::time::Instant;

use crate::action::Direction;
use crate::debounce::DebounceGate;
use crate::rect::{Point, Rect};
use crate::switch_list::SwitchList;

/// A physical display and the part of it windows maximize into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Opaque monitor identifier (an `HMONITOR` value on Windows).
    pub id: usize,
    /// Monitor bounds minus the taskbar and docked toolbars.
    pub work_area: Rect,
}

/// Read-mostly view of the OS window manager.
pub trait Desktop {
    /// Every connected monitor.
    fn monitors(&self) -> Vec<MonitorInfo>;

    /// The monitor containing (or nearest to) a screen point.
    fn monitor_at(&self, point: Point) -> Option<usize>;

    /// Current pointer position.
    fn cursor_position(&self) -> Option<Point>;

    /// The window with input focus, if any.
    fn foreground_window(&self) -> Option<usize>;

    /// Every top-level window, in Z order.
    fn top_level_windows(&self) -> Vec<usize>;

    /// Outer bounds of a window.
    fn window_rect(&self, hwnd: usize) -> Option<Rect>;

    /// Whether a window is visible and maximized right now.
    fn is_switchable(&self, hwnd: usize) -> bool;

    /// Gives input focus to a window.
    fn focus(&self, hwnd: usize);
}

/// Everything the animation needs to know about an accepted switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchPlan {
    /// The window being left (the foreground window when the request arrived).
    pub from: Option<usize>,
    /// The window being switched to.
    pub to: usize,
    /// The monitor under the pointer.
    pub monitor: MonitorInfo,
    pub direction: Direction,
}

/// Starts the visual transition for an accepted switch.
pub trait TransitionLauncher {
    fn launch(&mut self, plan: &SwitchPlan);
}

/// What a switch request ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Dropped because the previous start was too recent.
    Debounced,
    /// The pointer is over a monitor the tracker does not know.
    NoMonitor,
    /// The active monitor has zero or one switchable windows.
    TooFewWindows,
    /// Already at the first (prev) or last (next) window.
    AtEdge,
    /// A transition was launched and focus moved to `to`.
    Switched { to: usize, index: usize },
}

/// Tracking state for a single monitor.
#[derive(Debug, Clone)]
pub struct MonitorState {
    pub info: MonitorInfo,
    pub list: SwitchList,
}

/// Ordered switch lists and cursors for every monitor.
pub struct SwitchTracker {
    monitors: Vec<MonitorState>,
}

impl SwitchTracker {
    /// Creates a tracker with an empty list per monitor.
    pub fn new(monitors: Vec<MonitorInfo>) -> Self {
        Self {
            monitors: monitors
                .into_iter()
                .map(|info| MonitorState {
                    info,
                    list: SwitchList::new(),
                })
                .collect(),
        }
    }

    pub fn monitors(&self) -> &[MonitorState] {
        &self.monitors
    }

    /// Looks up a monitor's state by its identifier.
    pub fn monitor(&self, id: usize) -> Option<&MonitorState> {
        self.monitors.iter().find(|m| m.info.id == id)
    }

    /// Total number of tracked windows across all monitors.
    pub fn window_count(&self) -> usize {
        self.monitors.iter().map(|m| m.list.len()).sum()
    }

    fn position(&self, id: usize) -> Option<usize> {
        self.monitors.iter().position(|m| m.info.id == id)
    }

    /// Index of the monitor that owns a window: the one containing its center.
    fn owner_of(&self, desktop: &dyn Desktop, hwnd: usize) -> Option<usize> {
        let rect = desktop.window_rect(hwnd)?;
        self.position(desktop.monitor_at(rect.center())?)
    }

    /// Rebuilds every list from scratch.
    ///
    /// The foreground window (if switchable) goes first so the cursor of
    /// its monitor starts on it; everything else is discovered by a
    /// regular [`scan`](Self::scan).
    pub fn seed(&mut self, desktop: &dyn Desktop) {
        for monitor in &mut self.monitors {
            monitor.list.clear();
        }

        if let Some(fg) = desktop.foreground_window()
            && desktop.is_switchable(fg)
            && let Some(idx) = self.owner_of(desktop, fg)
        {
            let list = &mut self.monitors[idx].list;
            list.add(fg);
            list.set_cursor(Some(0));
        }

        self.scan(desktop);
        crate::log_info!("Seeded tracker with {} windows", self.window_count());
    }

    /// Prunes stale entries, then appends newly maximized windows.
    pub fn scan(&mut self, desktop: &dyn Desktop) {
        for monitor in &mut self.monitors {
            let dropped = monitor.list.retain(|hwnd| desktop.is_switchable(hwnd));
            for hwnd in dropped {
                crate::log_debug!("Dropped 0x{hwnd:X} from monitor 0x{:X}", monitor.info.id);
            }
        }

        for hwnd in desktop.top_level_windows() {
            if !desktop.is_switchable(hwnd) {
                continue;
            }
            let Some(owner) = self.owner_of(desktop, hwnd) else {
                continue;
            };
            if self.monitors[owner].list.contains(hwnd) {
                continue;
            }
            // A window maximized onto another monitor belongs to that one only.
            for (idx, monitor) in self.monitors.iter_mut().enumerate() {
                if idx != owner {
                    monitor.list.remove(hwnd);
                }
            }
            self.monitors[owner].list.add(hwnd);
            crate::log_debug!(
                "Tracking 0x{hwnd:X} on monitor 0x{:X}",
                self.monitors[owner].info.id
            );
        }
    }

    /// Points the foreground window's own monitor cursor at it.
    ///
    /// Keeps cursors honest when focus changes through Alt-Tab, the
    /// taskbar or a mouse click.
    pub fn follow_foreground(&mut self, desktop: &dyn Desktop) {
        if let Some(fg) = desktop.foreground_window()
            && let Some(idx) = self.owner_of(desktop, fg)
        {
            self.monitors[idx].list.sync_to(fg);
        }
    }

    /// One periodic tick: [`scan`](Self::scan) then [`follow_foreground`](Self::follow_foreground).
    pub fn refresh(&mut self, desktop: &dyn Desktop) {
        self.scan(desktop);
        self.follow_foreground(desktop);
    }

    /// Handles a previous/next request for the monitor under the pointer.
    ///
    /// Stale targets (no longer visible or maximized) are pruned and the
    /// same direction is retried on the shorter list until a live target
    /// is found or the list runs out.
    pub fn request_switch(
        &mut self,
        desktop: &dyn Desktop,
        gate: &DebounceGate,
        launcher: &mut dyn TransitionLauncher,
        direction: Direction,
        now: Instant,
    ) -> SwitchOutcome {
        if !gate.can_start_at(now) {
            crate::log_debug!("Switch {direction:?} debounced");
            return SwitchOutcome::Debounced;
        }

        let Some(idx) = desktop
            .cursor_position()
            .and_then(|p| desktop.monitor_at(p))
            .and_then(|id| self.position(id))
        else {
            return SwitchOutcome::NoMonitor;
        };

        let foreground = desktop.foreground_window();
        let state = &mut self.monitors[idx];

        if state.list.len() <= 1 {
            return SwitchOutcome::TooFewWindows;
        }
        if let Some(fg) = foreground {
            state.list.sync_to(fg);
        }

        loop {
            if state.list.len() <= 1 {
                return SwitchOutcome::TooFewWindows;
            }
            let Some(index) = step(state.list.cursor(), direction, state.list.len()) else {
                return SwitchOutcome::AtEdge;
            };
            let Some(target) = state.list.get(index) else {
                return SwitchOutcome::AtEdge;
            };

            if !desktop.is_switchable(target) {
                crate::log_info!("Pruning stale target 0x{target:X} and retrying");
                state.list.remove_at(index);
                continue;
            }

            let plan = SwitchPlan {
                from: foreground.or_else(|| state.list.current()),
                to: target,
                monitor: state.info,
                direction,
            };
            crate::log_info!(
                "Switch {direction:?} on monitor 0x{:X}: {:?} -> 0x{target:X} (index {index})",
                state.info.id,
                plan.from
            );

            launcher.launch(&plan);
            desktop.focus(target);
            state.list.set_cursor(Some(index));
            return SwitchOutcome::Switched { to: target, index };
        }
    }
}

/// Next cursor position, or `None` at the list boundary (no wraparound).
///
/// An unset cursor behaves like index -1: forward selects the first entry.
fn step(cursor: Option<usize>, direction: Direction, len: usize) -> Option<usize> {
    match (cursor, direction) {
        (None, Direction::Next) => (len > 0).then_some(0),
        (None, Direction::Prev) => None,
        (Some(c), Direction::Next) => (c + 1 < len).then_some(c + 1),
        (Some(c), Direction::Prev) => c.checked_sub(1),
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
