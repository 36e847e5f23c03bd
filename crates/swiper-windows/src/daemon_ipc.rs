use std::sync::mpsc;

use swiper_core::ipc::{Command, Response};

use crate::event_loop::LoopWaker;
use crate::ipc::PipeServer;

use super::daemon_types::Request;

/// Serves CLI connections one at a time on a dedicated thread.
///
/// Each command is queued for the loop thread, which is then woken up;
/// the reply travels back on a per-request channel. Returns after
/// answering `stop` or once the loop thread is gone.
pub(super) fn ipc_loop(tx: mpsc::Sender<Request>, waker: LoopWaker) {
    let server = match PipeServer::create() {
        Ok(s) => s,
        Err(e) => {
            swiper_core::log_error!("Failed to create pipe: {e}");
            return;
        }
    };

    loop {
        let connection = match server.accept() {
            Ok(c) => c,
            Err(e) => {
                swiper_core::log_error!("Pipe accept failed: {e}");
                return;
            }
        };

        let command = match connection.read_command() {
            Ok(c) => c,
            Err(e) => {
                swiper_core::log_warn!("Bad IPC request: {e}");
                let _ = connection.reply(&Response::error(format!("Invalid request: {e}")));
                continue;
            }
        };

        let is_stop = matches!(command, Command::Stop);
        let (reply_tx, reply_rx) = mpsc::channel();
        let queued = tx
            .send(Request {
                command,
                reply: reply_tx,
            })
            .is_ok();
        if !queued || !waker.wake() {
            let _ = connection.reply(&Response::error("Daemon is shutting down"));
            return;
        }

        let Ok(response) = reply_rx.recv() else {
            let _ = connection.reply(&Response::error("Daemon is shutting down"));
            return;
        };
        if let Err(e) = connection.reply(&response) {
            swiper_core::log_warn!("Failed to send IPC reply: {e}");
        }

        if is_stop {
            return;
        }
    }
}
