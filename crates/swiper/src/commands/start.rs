use std::os::windows::process::CommandExt;
use std::process::{Command, Stdio};
use std::time::Duration;

use swiper_core::{config, pid};
use swiper_windows::{ipc, process};

/// `CREATE_NO_WINDOW | CREATE_NEW_PROCESS_GROUP`: no console, no inherited
/// handles, and Ctrl+C in the launching terminal does not reach the daemon.
const DETACH_FLAGS: u32 = 0x08000000 | 0x00000200;

/// How long to wait for the new daemon's pipe before reporting failure.
const STARTUP_TIMEOUT: Duration = Duration::from_secs(3);

pub fn execute() {
    if ipc::is_daemon_running() {
        println!("Swiper is already running.");
        return;
    }

    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("Swiper process exists (PID: {pid}) but is not responding.");
            return;
        }
        let _ = pid::remove_pid_file();
    }

    if let Err(e) = config::try_load() {
        eprintln!("Warning: {e}\nStarting with default settings.");
    }

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            eprintln!("Error: could not locate the swiper executable: {e}");
            std::process::exit(1);
        }
    };

    let mut child = match Command::new(exe)
        .arg("daemon")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .creation_flags(DETACH_FLAGS)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            eprintln!("Error: failed to start daemon: {e}");
            std::process::exit(1);
        }
    };
    let pid = child.id();
    let _ = child.try_wait();

    if !ipc::wait_for_daemon(STARTUP_TIMEOUT) {
        eprintln!("Daemon (PID: {pid}) did not come up. Enable [logging] and check swiper.log.");
        std::process::exit(1);
    }

    print_banner(pid);
}

fn print_banner(pid: u32) {
    let d = "\x1b[90m";
    let w = "\x1b[1;97m";
    let r = "\x1b[0m";
    let chords: Vec<String> = config::load_keybindings()
        .iter()
        .map(|b| format!("{} {:?}", b.chord(), b.action))
        .collect();

    super::banner::print_logo();
    println!();
    println!("  {d}Config{r}   ~/.config/swiper/");
    println!("  {d}Daemon{r}   Started (PID: {w}{pid}{r})");
    println!("  {d}Hotkeys{r}  {}", chords.join(", "));
    println!();
}
