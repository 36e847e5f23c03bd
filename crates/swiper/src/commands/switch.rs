use swiper_core::ipc::ResponseStatus;
use swiper_core::{Command, Direction};
use swiper_windows::ipc;

/// Asks the daemon to switch exactly as the matching hotkey would.
pub fn execute(direction: Direction) {
    if !ipc::is_daemon_running() {
        eprintln!("Swiper is not running.");
        std::process::exit(1);
    }

    match ipc::send_command(&Command::Switch { direction }) {
        Ok(response) if response.status == ResponseStatus::Ok => {
            if let Some(msg) = response.message {
                println!("{msg}");
            }
        }
        Ok(response) => {
            eprintln!(
                "Error: {}",
                response.message.unwrap_or("unknown error".into())
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Failed to send switch request: {e}");
            std::process::exit(1);
        }
    }
}
