mod commands;

use clap::{Parser, Subcommand};

use swiper_core::Direction;

#[derive(Parser)]
#[command(
    name = "swiper",
    version,
    about = "Slide between maximized windows on the monitor under the cursor"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default configuration files
    Init,
    /// Start the switcher daemon
    Start,
    /// Stop the switcher daemon
    Stop,
    /// Show whether the daemon is running and what it tracks
    Status,
    /// Switch windows on the monitor under the cursor
    Switch {
        #[command(subcommand)]
        direction: SwitchDirection,
    },
    /// Debugging and inspection tools
    Debug {
        #[command(subcommand)]
        command: DebugCommands,
    },
    /// Run the daemon (internal, not for direct use)
    #[command(hide = true)]
    Daemon,
}

#[derive(Subcommand, Clone, Copy)]
enum SwitchDirection {
    /// Slide to the previous maximized window
    Prev,
    /// Slide to the next maximized window
    Next,
}

impl From<SwitchDirection> for Direction {
    fn from(d: SwitchDirection) -> Self {
        match d {
            SwitchDirection::Prev => Direction::Prev,
            SwitchDirection::Next => Direction::Next,
        }
    }
}

#[derive(Subcommand)]
enum DebugCommands {
    /// List switchable windows per monitor
    List,
    /// Print cursor, window and monitor details as they change
    Spy(commands::debug::spy::SpyArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => commands::init::execute(),
        other => run_windows(other),
    }
}

#[cfg(windows)]
fn run_windows(command: Commands) {
    match command {
        Commands::Init => commands::init::execute(),
        Commands::Start => commands::start::execute(),
        Commands::Stop => commands::stop::execute(),
        Commands::Status => commands::status::execute(),
        Commands::Daemon => commands::daemon::execute(),
        Commands::Switch { direction } => commands::switch::execute(direction.into()),
        Commands::Debug { command } => match command {
            DebugCommands::List => commands::debug::list::execute(),
            DebugCommands::Spy(args) => commands::debug::spy::execute(&args),
        },
    }
}

#[cfg(not(windows))]
fn run_windows(_command: Commands) {
    eprintln!("Swiper only runs on Windows.");
    std::process::exit(1);
}
