//! Ctrl+C handling for the foreground debug commands.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use swiper_core::WindowResult;
use windows::Win32::System::Console::{CTRL_C_EVENT, SetConsoleCtrlHandler};

static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Sends `()` on `tx` whenever Ctrl+C is pressed.
///
/// Only one handler may be installed per process.
pub fn set_handler(tx: Sender<()>) -> WindowResult<()> {
    SENDER
        .set(tx)
        .map_err(|_| "Ctrl+C handler already registered")?;
    // SAFETY: `handler` is a plain function that only touches `SENDER`.
    unsafe { SetConsoleCtrlHandler(Some(handler), true)? };
    Ok(())
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if ctrl_type == CTRL_C_EVENT
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(());
    }
    windows::core::BOOL(1)
}
