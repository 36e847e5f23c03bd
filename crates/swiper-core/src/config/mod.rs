pub mod keybinding;
mod loader;
pub mod template;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use keybinding::{Keybinding, Modifier};
pub use loader::{config_dir, config_path, keybindings_path, load, load_keybindings, try_load};

/// Top-level configuration for Swiper.
///
/// Loaded from `~/.config/swiper/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slide transition timing.
    pub animation: AnimationConfig,
    /// Window discovery polling.
    pub scan: ScanConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Slide transition timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Length of one slide in milliseconds.
    pub duration_ms: u64,
    /// Upper bound on rendered frames per second.
    pub target_fps: u32,
    /// Minimum time between two accepted switch starts, in milliseconds.
    pub debounce_ms: u64,
}

/// Window discovery polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// How often every monitor's switch list is rescanned, in milliseconds.
    pub interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            target_fps: 144,
            debounce_ms: 300,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { interval_ms: 100 }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl ScanConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Clamps timing values to ranges the render loop can honour.
    pub fn validate(&mut self) {
        self.animation.duration_ms = self.animation.duration_ms.clamp(50, 5000);
        self.animation.target_fps = self.animation.target_fps.clamp(15, 360);
        self.animation.debounce_ms = self.animation.debounce_ms.min(5000);
        self.scan.interval_ms = self.scan.interval_ms.clamp(16, 5000);
    }
}

/// Wrapper for deserializing the keybindings file.
///
/// The file contains a top-level `[[keybinding]]` array of tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct KeybindingsFile {
    #[serde(default = "keybinding::defaults")]
    pub(crate) keybinding: Vec<Keybinding>,
}
