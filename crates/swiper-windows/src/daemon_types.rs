use std::sync::mpsc;

use swiper_core::ipc::{Command, Response};

/// A CLI command handed from the IPC thread to the loop thread.
pub(super) struct Request {
    pub command: Command,
    /// Carries the reply back to the waiting IPC thread.
    pub reply: mpsc::Sender<Response>,
}
