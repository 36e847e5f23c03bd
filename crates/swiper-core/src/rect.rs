/// A point in virtual-screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle representing a window's or monitor's position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from Win32-style edge coordinates.
    pub fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Vertical center of the rectangle.
    pub fn center_y(&self) -> i32 {
        self.y + self.height / 2
    }

    /// The center point, used to decide which monitor owns a window.
    pub fn center(&self) -> Point {
        Point::new(self.center_x(), self.center_y())
    }

    /// Returns whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom
    /// edges exclusive, matching `PtInRect`.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Returns whether the rectangle has no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_of_maximized_window() {
        // Arrange
        let rect = Rect::from_edges(-8, -8, 1928, 1040);

        // Act / Assert
        assert_eq!(rect.center(), Point::new(960, 516));
    }

    #[test]
    fn contains_uses_half_open_edges() {
        // Arrange
        let rect = Rect::new(1920, 0, 2560, 1400);

        // Act / Assert
        assert!(rect.contains(Point::new(1920, 0)));
        assert!(rect.contains(Point::new(4479, 1399)));
        assert!(!rect.contains(Point::new(4480, 10)));
        assert!(!rect.contains(Point::new(1919, 10)));
    }

    #[test]
    fn zero_sized_rect_is_empty() {
        assert!(Rect::new(0, 0, 0, 100).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }
}
