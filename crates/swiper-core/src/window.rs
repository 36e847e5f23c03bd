use crate::Rect;

/// A boxed error type for window operations.
///
/// Any error type that implements `std::error::Error` can be boxed into
/// this, including `windows::core::Error` and plain `&str` messages.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read-only view of a top-level window.
///
/// Each platform crate (e.g. `swiper-windows`) provides its own implementation.
pub trait Window {
    /// Returns the window title.
    fn title(&self) -> WindowResult<String>;

    /// Returns the window class name.
    fn class(&self) -> WindowResult<String>;

    /// Returns the window bounding rectangle.
    fn rect(&self) -> WindowResult<Rect>;

    /// Returns whether the window is currently visible.
    fn is_visible(&self) -> bool;

    /// Returns whether the window is in the maximized display state.
    fn is_maximized(&self) -> bool;

    /// A window is switchable when it is both visible and maximized.
    fn is_switchable(&self) -> bool {
        self.is_visible() && self.is_maximized()
    }
}
