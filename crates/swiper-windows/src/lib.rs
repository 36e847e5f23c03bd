/// Key name to virtual-key code mapping.
pub mod keys;

/// `PrintWindow` capture into rasters.
#[cfg(windows)]
pub mod capture;

/// Capture plus Direct2D overlay rendering behind one seam.
#[cfg(windows)]
pub mod compositor;

/// Ctrl+C handling for foreground commands.
#[cfg(windows)]
pub mod ctrl_c;

/// Daemon main loop.
#[cfg(windows)]
pub mod daemon;

/// The live desktop as seen by the switch tracker.
#[cfg(windows)]
pub mod desktop;

/// Win32 window enumeration.
#[cfg(windows)]
pub mod enumerate;

/// Single-threaded message loop host.
#[cfg(windows)]
pub mod event_loop;

/// Global hotkey registration.
#[cfg(windows)]
pub mod hotkey;

/// Snapshots for the `debug` commands.
#[cfg(windows)]
pub mod inspect;

/// IPC via Named Pipes.
#[cfg(windows)]
pub mod ipc;

/// Starts and ticks slide transitions.
#[cfg(windows)]
pub mod launcher;

/// Display enumeration and DPI awareness.
#[cfg(windows)]
pub mod monitor;

/// Reversible window style, visibility and DWM attribute changes.
#[cfg(windows)]
pub mod native_state;

/// Warning message boxes.
#[cfg(windows)]
pub mod notify;

/// Click-through topmost overlay window.
#[cfg(windows)]
pub mod overlay;

/// Process utilities (alive check, kill).
#[cfg(windows)]
pub mod process;

/// Direct2D render target for the overlay.
#[cfg(windows)]
pub mod renderer;

/// Window type wrapping a Win32 `HWND`.
#[cfg(windows)]
pub mod window;

#[cfg(windows)]
pub use window::Window;
