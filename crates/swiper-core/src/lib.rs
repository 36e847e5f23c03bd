pub mod action;
pub mod config;
pub mod debounce;
pub mod easing;
pub mod ipc;
pub mod log;
pub mod mutation;
pub mod pacing;
pub mod pid;
pub mod raster;
pub mod rect;
pub mod slide;
pub mod stage;
pub mod switch_list;
pub mod tracker;
pub mod transition;
pub mod window;

pub use action::{Action, Direction};
pub use config::Config;
pub use debounce::DebounceGate;
pub use ipc::{Command, PIPE_NAME, Response};
pub use rect::{Point, Rect};
pub use tracker::{
    Desktop, MonitorInfo, SwitchOutcome, SwitchPlan, SwitchTracker, TransitionLauncher,
};
pub use transition::{Phase, Stage, Transition};
pub use window::{Window, WindowResult};
