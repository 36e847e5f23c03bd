//! Commented starter files written by `swiper init`.

/// Generates the default `config.toml` contents with explanatory comments.
pub fn generate_config() -> String {
    r##"# Swiper configuration
# Location: ~/.config/swiper/config.toml

[animation]
# Length of one slide transition in milliseconds.
duration_ms = 300
# Upper bound on rendered frames per second. Frames are skipped, never
# queued, when the machine is busy.
target_fps = 144
# Switch requests arriving sooner than this after the last accepted one
# are dropped.
debounce_ms = 300

[scan]
# How often maximized windows are rediscovered, in milliseconds.
interval_ms = 100

[logging]
# Enable file logging to ~/.config/swiper/logs/swiper.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}

/// Generates the default `keybindings.toml` contents.
pub fn generate_keybindings() -> String {
    r##"# Swiper keybindings
# Location: ~/.config/swiper/keybindings.toml
#
# action:    "switch-prev" or "switch-next"
# key:       A-Z, 0-9, F1-F24, Left, Right, Up, Down, Space, Tab, ...
# modifiers: any of "alt", "shift", "ctrl", "win"
#
# A chord that another program already owns cannot be registered; Swiper
# warns once at startup and keeps running without it.

[[keybinding]]
action = "switch-prev"
key = "J"
modifiers = ["alt"]

[[keybinding]]
action = "switch-next"
key = "K"
modifiers = ["alt"]
"##
    .to_string()
}
