use std::path::PathBuf;

use super::{Config, Keybinding, KeybindingsFile, keybinding};

/// Returns the config directory: `~/.config/swiper/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("swiper"))
}

/// Returns the config file path: `~/.config/swiper/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Returns the keybindings file path: `~/.config/swiper/keybindings.toml`.
pub fn keybindings_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("keybindings.toml"))
}

/// Tries to load and parse `config.toml`.
///
/// Returns the validated config, or an error string describing what
/// went wrong (IO error, parse error, etc.).
pub fn try_load() -> Result<Config, String> {
    let path = config_path().ok_or("could not determine config path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse_config(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Loads the configuration from disk, falling back to defaults.
///
/// A missing file silently yields defaults; any other failure is
/// reported on stderr before falling back.
pub fn load() -> Config {
    load_or_default(try_load, || {
        let mut config = Config::default();
        config.validate();
        config
    })
}

/// Loads keybindings from `keybindings.toml`, falling back to defaults.
pub fn load_keybindings() -> Vec<Keybinding> {
    load_or_default(try_load_keybindings, keybinding::defaults)
}

fn try_load_keybindings() -> Result<Vec<Keybinding>, String> {
    let path = keybindings_path().ok_or("could not determine keybindings path")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {e}", path.display()))?;
    parse_keybindings(&content).map_err(|e| format!("{}: {e}", path.display()))
}

pub(crate) fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    let mut config: Config = toml::from_str(content)?;
    config.validate();
    Ok(config)
}

pub(crate) fn parse_keybindings(content: &str) -> Result<Vec<Keybinding>, toml::de::Error> {
    let file: KeybindingsFile = toml::from_str(content)?;
    Ok(file.keybinding)
}

fn load_or_default<T>(load: impl FnOnce() -> Result<T, String>, fallback: impl FnOnce() -> T) -> T {
    match load() {
        Ok(value) => value,
        Err(e) => {
            if !is_not_found(&e) {
                eprintln!("Warning: {e}");
                crate::log_warn!("Config load failed, using defaults: {e}");
            }
            fallback()
        }
    }
}

/// `read_to_string` reports a missing file with the OS "not found" text.
fn is_not_found(error: &str) -> bool {
    let lower = error.to_ascii_lowercase();
    lower.contains("cannot find the file")
        || lower.contains("no such file")
        || lower.contains("could not determine")
}
