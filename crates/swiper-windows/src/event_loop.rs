//! The daemon's single-threaded Win32 message loop.
//!
//! Hotkeys, the scan timer, IPC wake-ups and animation frames are all
//! serviced on the thread that calls [`run`]. Pending messages are drained
//! first, then the handler gets an idle slice, then the thread sleeps
//! until the next message or until the handler's next deadline.

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use swiper_core::WindowResult;
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::{GetCurrentThreadId, INFINITE};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, KillTimer, MSG, MsgWaitForMultipleObjects, PM_NOREMOVE, PM_REMOVE,
    PeekMessageW, PostThreadMessageW, QS_ALLINPUT, SetTimer, TranslateMessage, WM_APP,
    WM_HOTKEY, WM_QUIT, WM_TIMER,
};

/// Posted to the loop thread when work is queued from another thread.
const WM_WAKE: u32 = WM_APP + 1;

/// Callbacks invoked by [`run`], all on the loop thread.
pub trait LoopHandler {
    /// A registered hotkey fired.
    fn on_hotkey(&mut self, id: i32);

    /// A thread timer elapsed.
    fn on_timer(&mut self, id: usize);

    /// Another thread posted a wake-up through a [`LoopWaker`].
    fn on_wake(&mut self) -> ControlFlow<()>;

    /// Called once the queue is empty. Returns how long the loop may sleep
    /// before calling again, or `None` to sleep until the next message.
    fn on_idle(&mut self, now: Instant) -> Option<Duration>;
}

/// Runs until `WM_QUIT` arrives or a handler breaks.
pub fn run(handler: &mut impl LoopHandler) {
    let mut msg = MSG::default();
    loop {
        // SAFETY: `msg` is a valid out-parameter for every call.
        while unsafe { PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() } {
            match msg.message {
                WM_QUIT => return,
                WM_HOTKEY => handler.on_hotkey(msg.wParam.0 as i32),
                WM_TIMER if msg.hwnd.is_invalid() => handler.on_timer(msg.wParam.0),
                WM_WAKE => {
                    if handler.on_wake().is_break() {
                        return;
                    }
                }
                // SAFETY: `msg` was just filled in by PeekMessageW.
                _ => unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                },
            }
        }

        let timeout = handler
            .on_idle(Instant::now())
            .map_or(INFINITE, |d| d.as_millis().min(u128::from(INFINITE - 1)) as u32);
        if timeout > 0 {
            // SAFETY: no handles, wakes on any queued input.
            unsafe {
                let _ = MsgWaitForMultipleObjects(None, false, timeout, QS_ALLINPUT);
            }
        }
    }
}

/// Lets other threads interrupt the loop's wait.
#[derive(Debug, Clone, Copy)]
pub struct LoopWaker {
    thread_id: u32,
}

impl LoopWaker {
    /// A waker for the calling thread, which must be the one that calls [`run`].
    pub fn current() -> Self {
        let mut msg = MSG::default();
        // SAFETY: forces creation of the thread's message queue so posts
        // made before the loop starts are not lost.
        unsafe {
            let _ = PeekMessageW(&mut msg, None, 0, 0, PM_NOREMOVE);
        }
        Self {
            // SAFETY: simple query.
            thread_id: unsafe { GetCurrentThreadId() },
        }
    }

    /// Returns `false` once the loop thread is gone.
    pub fn wake(&self) -> bool {
        // SAFETY: posting to a thread id is harmless if the thread exited.
        unsafe { PostThreadMessageW(self.thread_id, WM_WAKE, WPARAM(0), LPARAM(0)).is_ok() }
    }

    /// Asks the loop to exit as if `WM_QUIT` had been posted.
    pub fn quit(&self) {
        // SAFETY: posting to a thread id is harmless if the thread exited.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
    }
}

/// A repeating thread timer delivered as `WM_TIMER` to the loop.
pub struct ThreadTimer {
    id: usize,
}

impl ThreadTimer {
    pub fn start(interval: Duration) -> WindowResult<Self> {
        let ms = interval.as_millis().clamp(1, u128::from(u32::MAX)) as u32;
        // SAFETY: a thread timer without a callback posts WM_TIMER.
        let id = unsafe { SetTimer(None, 0, ms, None) };
        if id == 0 {
            return Err("SetTimer failed".into());
        }
        Ok(Self { id })
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        // SAFETY: kills the thread timer created in `start`.
        unsafe {
            let _ = KillTimer(None, self.id);
        }
    }
}
