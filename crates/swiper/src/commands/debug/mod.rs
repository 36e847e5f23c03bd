#[cfg(windows)]
pub mod list;
pub mod spy;
