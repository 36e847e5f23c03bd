use std::fs;
use std::path::PathBuf;

use crate::WindowResult;

/// Returns the Swiper data directory (`%LOCALAPPDATA%\swiper`).
///
/// Creates the directory if it doesn't exist.
fn data_dir() -> WindowResult<PathBuf> {
    let base =
        std::env::var("LOCALAPPDATA").map_err(|_| "LOCALAPPDATA environment variable not set")?;

    let dir = PathBuf::from(base).join("swiper");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Returns the path to the PID file.
pub fn pid_path() -> WindowResult<PathBuf> {
    Ok(data_dir()?.join("swiper.pid"))
}

/// Records the daemon's PID so the CLI can find a stuck daemon.
pub fn write_pid_file() -> WindowResult<()> {
    fs::write(pid_path()?, std::process::id().to_string())?;
    Ok(())
}

/// Reads the PID from the PID file, if it exists.
pub fn read_pid_file() -> WindowResult<Option<u32>> {
    let path = pid_path()?;

    if !path.exists() {
        return Ok(None);
    }

    parse_pid(&fs::read_to_string(&path)?).map(Some)
}

/// Removes the PID file. Called when the daemon shuts down cleanly.
pub fn remove_pid_file() -> WindowResult<()> {
    let path = pid_path()?;

    if path.exists() {
        fs::remove_file(&path)?;
    }

    Ok(())
}

fn parse_pid(contents: &str) -> WindowResult<u32> {
    contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid PID file contents: {e}").into())
}
