//! Line-delimited JSON over the `\\.\pipe\swiper` named pipe.
//!
//! Each connection carries exactly one [`Command`] from the CLI and one
//! [`Response`] back from the daemon.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;
use std::time::{Duration, Instant};

use swiper_core::WindowResult;
use swiper_core::ipc::{Command, PIPE_NAME, Response};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;
const BUFFER_SIZE: u32 = 1024;

/// Owns a pipe handle and closes it on drop.
struct OwnedPipe(HANDLE);

impl OwnedPipe {
    /// A `File` over a duplicate of the handle, closed independently.
    fn file(&self) -> WindowResult<File> {
        let mut dup = HANDLE::default();
        // SAFETY: the duplicate is owned by the returned File.
        unsafe {
            let process = GetCurrentProcess();
            DuplicateHandle(
                process,
                self.0,
                process,
                &mut dup,
                0,
                false,
                DUPLICATE_SAME_ACCESS,
            )?;
            Ok(File::from_raw_handle(dup.0))
        }
    }
}

impl Drop for OwnedPipe {
    fn drop(&mut self) {
        // SAFETY: the handle is owned exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Daemon side: one pipe instance, serving one client at a time.
pub struct PipeServer {
    pipe: OwnedPipe,
}

impl PipeServer {
    pub fn create() -> WindowResult<Self> {
        // SAFETY: valid parameters; the result is checked below.
        let handle = unsafe {
            CreateNamedPipeW(
                &HSTRING::from(PIPE_NAME),
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                BUFFER_SIZE,
                BUFFER_SIZE,
                0,
                None,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err("Failed to create named pipe".into());
        }
        Ok(Self {
            pipe: OwnedPipe(handle),
        })
    }

    /// Blocks until a client connects.
    ///
    /// The returned connection disconnects the client when dropped, so a
    /// malformed request never leaves the pipe stuck.
    pub fn accept(&self) -> WindowResult<Connection<'_>> {
        // SAFETY: blocking connect on a handle we own.
        unsafe { ConnectNamedPipe(self.pipe.0, None)? };
        Ok(Connection { pipe: &self.pipe })
    }
}

/// A connected client on a [`PipeServer`].
pub struct Connection<'a> {
    pipe: &'a OwnedPipe,
}

impl Connection<'_> {
    pub fn read_command(&self) -> WindowResult<Command> {
        let mut line = String::new();
        BufReader::new(self.pipe.file()?).read_line(&mut line)?;
        Ok(serde_json::from_str(line.trim())?)
    }

    pub fn reply(&self, response: &Response) -> WindowResult<()> {
        let mut writer = self.pipe.file()?;
        writeln!(writer, "{}", serde_json::to_string(response)?)?;
        writer.flush()?;
        // SAFETY: waits until the client has drained the pipe, otherwise
        // the disconnect would discard the unread reply.
        unsafe {
            let _ = FlushFileBuffers(self.pipe.0);
        }
        Ok(())
    }
}

impl Drop for Connection<'_> {
    fn drop(&mut self) {
        // SAFETY: resets the instance so the next client can connect.
        unsafe {
            let _ = DisconnectNamedPipe(self.pipe.0);
        }
    }
}

/// CLI side: sends one command and waits for the reply.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    // SAFETY: opens an existing pipe as a client; closed by `OwnedPipe`.
    let pipe = OwnedPipe(unsafe {
        CreateFileW(
            &HSTRING::from(PIPE_NAME),
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    });

    let mut writer = pipe.file()?;
    writeln!(writer, "{}", serde_json::to_string(command)?)?;
    writer.flush()?;

    let mut line = String::new();
    BufReader::new(pipe.file()?).read_line(&mut line)?;
    if line.trim().is_empty() {
        return Err("daemon closed the connection without replying".into());
    }
    Ok(serde_json::from_str(line.trim())?)
}

/// Whether the daemon's pipe exists, without consuming a connection.
pub fn is_daemon_running() -> bool {
    // SAFETY: a 1 ms existence probe.
    unsafe { WaitNamedPipeW(&HSTRING::from(PIPE_NAME), 1).as_bool() }
}

/// Polls until the daemon's pipe appears or `timeout` passes.
pub fn wait_for_daemon(timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if is_daemon_running() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    is_daemon_running()
}
