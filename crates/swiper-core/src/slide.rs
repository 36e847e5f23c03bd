use crate::action::Direction;

/// Horizontal placement of both bitmaps for one rendered frame.
///
/// Offsets are whole pixels relative to the overlay's left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideFrame {
    /// Where the window being left is drawn.
    pub outgoing_x: i32,
    /// Where the window being switched to is drawn.
    pub incoming_x: i32,
}

impl SlideFrame {
    /// Computes the frame for an already-eased progress value.
    ///
    /// Moving forward, everything slides left and the incoming window
    /// enters from the right edge; backward is the mirror image.
    pub fn at(width: i32, eased: f32, direction: Direction) -> Self {
        let outgoing_x = slide_offset(width, eased, direction);
        let incoming_x = if direction.is_forward() {
            outgoing_x + width
        } else {
            outgoing_x - width
        };
        Self {
            outgoing_x,
            incoming_x,
        }
    }
}

/// Offset of the outgoing window, rounded to avoid sub-pixel shimmer.
pub fn slide_offset(width: i32, eased: f32, direction: Direction) -> i32 {
    let sign = if direction.is_forward() { -1.0 } else { 1.0 };
    (width as f32 * eased * sign).round() as i32
}
