use std::sync::mpsc;
use std::thread;

use swiper_core::config::{self, Config};
use swiper_core::{DebounceGate, SwitchTracker, WindowResult, pid};

use crate::ctrl_c;
use crate::desktop::Win32Desktop;
use crate::event_loop::{self, LoopWaker, ThreadTimer};
use crate::hotkey::HotkeyManager;
use crate::launcher::SlideLauncher;
use crate::monitor;

#[path = "daemon_host.rs"]
mod daemon_host;
#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_types.rs"]
mod daemon_types;

use daemon_host::DaemonHost;
use daemon_types::Request;

/// Runs the Swiper daemon until it is stopped.
///
/// Everything that touches windows runs on the calling thread's message
/// loop. Only the named-pipe listener gets a thread of its own.
pub fn run() -> WindowResult<()> {
    monitor::enable_per_monitor_dpi();
    pid::write_pid_file()?;

    let config = config::load();
    swiper_core::log::init(&config.logging);
    swiper_core::log_info!("Daemon started (PID: {})", std::process::id());
    swiper_core::log_info!(
        "Config: animation({} ms @ {} fps, debounce {} ms), scan({} ms)",
        config.animation.duration_ms,
        config.animation.target_fps,
        config.animation.debounce_ms,
        config.scan.interval_ms
    );

    let result = serve(&config);
    let _ = pid::remove_pid_file();
    swiper_core::log_info!("Daemon stopped");
    result
}

fn serve(config: &Config) -> WindowResult<()> {
    let desktop = Win32Desktop::new();
    let mut tracker = SwitchTracker::new(swiper_core::Desktop::monitors(&desktop));
    tracker.seed(&desktop);
    swiper_core::log_info!(
        "Tracking {} windows on {} monitors",
        tracker.window_count(),
        tracker.monitors().len()
    );

    let waker = LoopWaker::current();
    let hotkeys = HotkeyManager::register(&config::load_keybindings());
    if hotkeys.is_empty() {
        swiper_core::log_warn!("No hotkeys registered, only IPC switch requests will work");
    } else {
        swiper_core::log_info!("{} hotkeys registered", hotkeys.len());
    }
    let scan_timer = ThreadTimer::start(config.scan.interval())?;

    let (tx, rx) = mpsc::channel::<Request>();
    let ipc_thread = thread::spawn(move || daemon_ipc::ipc_loop(tx, waker));
    watch_ctrl_c(waker);

    let mut host = DaemonHost {
        desktop,
        tracker,
        gate: DebounceGate::new(config.animation.debounce()),
        launcher: SlideLauncher::new(config.animation.clone()),
        hotkeys,
        scan_timer,
        requests: rx,
        stopped_by_ipc: false,
    };
    event_loop::run(&mut host);

    let stopped_by_ipc = host.stopped_by_ipc;
    host.shutdown();

    // The listener only returns on its own after serving `stop`; otherwise
    // it is still blocked waiting for a client and dies with the process.
    if stopped_by_ipc {
        let _ = ipc_thread.join();
    }
    Ok(())
}

/// Turns Ctrl+C into a clean loop exit when the daemon runs in a console.
fn watch_ctrl_c(waker: LoopWaker) {
    let (tx, rx) = mpsc::channel();
    if let Err(e) = ctrl_c::set_handler(tx) {
        swiper_core::log_debug!("No console Ctrl+C handler: {e}");
        return;
    }
    thread::spawn(move || {
        if rx.recv().is_ok() {
            swiper_core::log_info!("Ctrl+C received, shutting down");
            waker.quit();
        }
    });
}
