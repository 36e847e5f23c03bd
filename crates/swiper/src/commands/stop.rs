use swiper_core::ipc::ResponseStatus;
use swiper_core::{Command, pid};
use swiper_windows::{ipc, process};

pub fn execute() {
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Stop) {
            Ok(response) if response.status == ResponseStatus::Ok => {
                println!("Swiper stopped. {}", response.message.unwrap_or_default());
                return;
            }
            Ok(response) => {
                eprintln!(
                    "Error: {}",
                    response.message.unwrap_or("unknown error".into())
                );
                std::process::exit(1);
            }
            Err(e) => eprintln!("IPC failed: {e}"),
        }
    }

    // The pipe is gone but the process may still be alive.
    match pid::read_pid_file() {
        Ok(Some(pid)) if process::is_process_alive(pid) => match process::kill_process(pid) {
            Ok(()) => {
                let _ = pid::remove_pid_file();
                println!("Swiper stopped (killed PID {pid}).");
            }
            Err(e) => {
                eprintln!("Failed to kill process {pid}: {e}");
                std::process::exit(1);
            }
        },
        Ok(Some(_)) => {
            let _ = pid::remove_pid_file();
            println!("Swiper is not running (cleaned up stale PID file).");
        }
        _ => println!("Swiper is not running."),
    }
}
