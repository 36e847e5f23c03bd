use swiper_core::ipc::ResponseStatus;
use swiper_core::{Command, pid};
use swiper_windows::{ipc, process};

pub fn execute() {
    if ipc::is_daemon_running() {
        match ipc::send_command(&Command::Status) {
            Ok(response) if response.status == ResponseStatus::Ok => {
                println!(
                    "{}",
                    response.message.unwrap_or_else(|| "Swiper is running.".into())
                );
            }
            Ok(response) => {
                eprintln!("Error: {}", response.message.unwrap_or_default());
                std::process::exit(1);
            }
            // The pipe exists, so the daemon is up even if this request lost a race.
            Err(_) => println!("Swiper is running."),
        }
        return;
    }

    if let Ok(Some(pid)) = pid::read_pid_file() {
        if process::is_process_alive(pid) {
            println!("Swiper process exists (PID: {pid}) but is not responding.");
        } else {
            let _ = pid::remove_pid_file();
            println!("Swiper is not running (cleaned up stale PID file).");
        }
    } else {
        println!("Swiper is not running.");
    }
}
