use std::ops::ControlFlow;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use swiper_core::ipc::{Command, Response};
use swiper_core::{DebounceGate, Direction, SwitchOutcome, SwitchTracker};

use crate::desktop::Win32Desktop;
use crate::event_loop::{LoopHandler, ThreadTimer};
use crate::hotkey::HotkeyManager;
use crate::launcher::SlideLauncher;

use super::daemon_types::Request;

/// Everything the loop thread owns.
pub(super) struct DaemonHost {
    pub desktop: Win32Desktop,
    pub tracker: SwitchTracker,
    pub gate: DebounceGate,
    pub launcher: SlideLauncher,
    pub hotkeys: HotkeyManager,
    pub scan_timer: ThreadTimer,
    pub requests: mpsc::Receiver<Request>,
    pub stopped_by_ipc: bool,
}

impl DaemonHost {
    fn switch(&mut self, direction: Direction) -> SwitchOutcome {
        let outcome = self.tracker.request_switch(
            &self.desktop,
            &self.gate,
            &mut self.launcher,
            direction,
            Instant::now(),
        );
        swiper_core::log_debug!("Switch {direction:?}: {outcome:?}");
        outcome
    }

    fn handle_command(&mut self, command: &Command) -> Response {
        match command {
            Command::Stop => {
                swiper_core::log_info!("Stop command received, shutting down");
                Response::ok_with_message("Daemon stopping")
            }
            Command::Status => Response::ok_with_message(self.status_text()),
            Command::Switch { direction } => match self.switch(*direction) {
                SwitchOutcome::Switched { to, index } => {
                    Response::ok_with_message(format!("Switched to 0x{to:X} (index {index})"))
                }
                SwitchOutcome::Debounced => Response::ok_with_message("Ignored: too soon"),
                SwitchOutcome::NoMonitor => {
                    Response::error("The cursor is not over a tracked monitor")
                }
                SwitchOutcome::TooFewWindows => {
                    Response::ok_with_message("Nothing to switch to on this monitor")
                }
                SwitchOutcome::AtEdge => Response::ok_with_message("Already at the end of the list"),
            },
        }
    }

    fn status_text(&self) -> String {
        let mut text = format!(
            "Daemon is running, tracking {} windows",
            self.tracker.window_count()
        );
        for (i, monitor) in self.tracker.monitors().iter().enumerate() {
            let area = monitor.info.work_area;
            let cursor = monitor
                .list
                .cursor()
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            text.push_str(&format!(
                "\n  Monitor {}: {}x{} at ({}, {}), {} windows, cursor {cursor}",
                i + 1,
                area.width,
                area.height,
                area.x,
                area.y,
                monitor.list.len()
            ));
        }
        text
    }

    /// Restores any window still mid-slide and releases OS registrations.
    pub fn shutdown(self) {
        let Self {
            mut launcher,
            hotkeys,
            scan_timer,
            ..
        } = self;
        launcher.close();
        drop(scan_timer);
        drop(hotkeys);
    }
}

impl LoopHandler for DaemonHost {
    fn on_hotkey(&mut self, id: i32) {
        if let Some(action) = self.hotkeys.action_for(id) {
            self.switch(action.direction());
        }
    }

    fn on_timer(&mut self, id: usize) {
        if id == self.scan_timer.id() {
            self.tracker.refresh(&self.desktop);
        }
    }

    fn on_wake(&mut self) -> ControlFlow<()> {
        while let Ok(request) = self.requests.try_recv() {
            let response = self.handle_command(&request.command);
            let _ = request.reply.send(response);
            if matches!(request.command, Command::Stop) {
                self.stopped_by_ipc = true;
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn on_idle(&mut self, now: Instant) -> Option<Duration> {
        self.launcher.tick(now)
    }
}
